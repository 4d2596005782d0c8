use super::*;
use crate::writer::buffer::BufDesc;

fn entry(viewport: Rect) -> PlaneEntry {
    PlaneEntry {
        addr: 0x2_0000_1000,
        tmz: true,
        swizzle: 9,
        rotation: 0,
        h_mirror: true,
        v_mirror: false,
        bytes_per_element: 4,
        pitch: 1984,
        viewport,
    }
}

#[test]
fn one_source_one_destination() {
    let mut mem = [0u8; 64];
    let mut desc = BufDesc {
        gpu_va: 0x100,
        cpu: &mut mem,
        tmz: false,
    };
    let mut r = BufRegion::new(&mut desc);
    let mut w = PlaneDescWriter::init(&mut r, 1, 1).unwrap();
    w.add_source(&mut r, &entry(Rect::new(16, 8, 100, 50))).unwrap();
    w.add_destination(&mut r, &entry(Rect::new(0, 0, 200, 100))).unwrap();
    assert_eq!(w.complete().unwrap(), 0x100);
    assert_eq!(r.used(), (1 + 6 * 2) * 4);

    assert_eq!(r.read_dword(0), Some(u32::from(OP_PLANE_CFG)));
    assert_eq!(r.read_dword(4), Some(1 | (9 << 3) | (1 << 10) | (2 << 16)));
    assert_eq!(r.read_dword(8), Some(0x1000));
    assert_eq!(r.read_dword(12), Some(2));
    assert_eq!(r.read_dword(16), Some(1983));
    assert_eq!(r.read_dword(20), Some(16 | (8 << 16)));
    assert_eq!(r.read_dword(24), Some(99 | (49 << 16)));
}

#[test]
fn header_carries_plane_counts() {
    let mut mem = [0u8; 4 * 19];
    let mut desc = BufDesc {
        gpu_va: 0,
        cpu: &mut mem,
        tmz: false,
    };
    let mut r = BufRegion::new(&mut desc);
    let mut w = PlaneDescWriter::init(&mut r, 2, 1).unwrap();
    assert_eq!(r.read_dword(0), Some(u32::from(OP_PLANE_CFG) | (1 << 16)));
    let e = entry(Rect::new(0, 0, 8, 8));
    assert_eq!(w.add_destination(&mut r, &e), Err(VpeError::Error));
    w.add_source(&mut r, &e).unwrap();
    w.add_source(&mut r, &e).unwrap();
    w.add_destination(&mut r, &e).unwrap();
    assert!(w.complete().is_ok());
}

#[test]
fn unsupported_element_size_is_rejected() {
    let mut r = BufRegion::counting(0);
    let mut w = PlaneDescWriter::init(&mut r, 1, 1).unwrap();
    let mut e = entry(Rect::new(0, 0, 8, 8));
    e.bytes_per_element = 3;
    assert_eq!(w.add_source(&mut r, &e), Err(VpeError::PixelFormatNotSupported));
}
