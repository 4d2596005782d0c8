use super::*;
use crate::writer::buffer::BufDesc;

#[test]
fn descriptor_layout_matches_the_wire_format() {
    let mut mem = [0u8; 64];
    let mut desc = BufDesc {
        gpu_va: 0,
        cpu: &mut mem,
        tmz: false,
    };
    let mut r = BufRegion::new(&mut desc);
    let mut w = VpeDescWriter::init(&mut r, 3 << 16).unwrap();
    w.add_plane_desc(&mut r, 0x1_2345_6700, true).unwrap();
    w.add_config_desc(&mut r, 0x8000, false, false).unwrap();
    w.add_config_desc(&mut r, 0x8100, true, false).unwrap();
    w.complete(&mut r).unwrap();

    // header, plane reference, two config references
    assert_eq!(r.used(), (1 + 2 + 2 * 2) * 4);
    assert_eq!(r.read_dword(0), Some(0x0103_0001));
    assert_eq!(r.read_dword(4), Some(0x2345_6701));
    assert_eq!(r.read_dword(8), Some(0x1));
    assert_eq!(r.read_dword(12), Some(0x8000));
    assert_eq!(r.read_dword(20), Some(0x8102));
}

#[test]
fn config_refs_are_capped() {
    let mut r = BufRegion::counting(0);
    let mut w = VpeDescWriter::init(&mut r, 0).unwrap();
    w.add_plane_desc(&mut r, 0x100, false).unwrap();
    for i in 0..MAX_CONFIG_DESC {
        w.add_config_desc(&mut r, u64::from(i) * 4, false, false).unwrap();
    }
    assert_eq!(
        w.add_config_desc(&mut r, 0, false, false),
        Err(VpeError::CmdOverflowError)
    );
}

#[test]
fn misaligned_addresses_collide_with_flag_bits() {
    let mut r = BufRegion::counting(0);
    let mut w = VpeDescWriter::init(&mut r, 0).unwrap();
    assert_eq!(
        w.add_plane_desc(&mut r, 0x102, false),
        Err(VpeError::BufferAlignment)
    );
}

#[test]
fn complete_requires_plane_and_config() {
    let mut r = BufRegion::counting(0);
    let w = VpeDescWriter::init(&mut r, 0).unwrap();
    assert_eq!(w.complete(&mut r), Err(VpeError::Error));
}
