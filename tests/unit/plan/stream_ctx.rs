use super::*;
use crate::model::stream::ToneMapParams;
use crate::model::surface::{PixelFormat, Surface};
use crate::writer::config::{ConfigBlock, ShareClass};

fn stream() -> Stream {
    let surface = Surface::graphics(PixelFormat::Argb8888, 0x1000, 640, 480);
    let r = Rect::new(0, 0, 640, 480);
    Stream::new(surface, r, r)
}

fn blocks(addr: u64) -> ConfigBlocks {
    smallvec::smallvec![ConfigBlock {
        addr,
        class: ShareClass::StreamShared,
        pipe: 0,
    }]
}

#[test]
fn cache_is_keyed_by_pipe_and_kind() {
    let mut cache = ConfigCache::default();
    cache.insert(0, ConfigKind::StreamShared, blocks(0x100)).unwrap();
    cache
        .insert(0, ConfigKind::StreamOp(CmdType::Compositing), blocks(0x200))
        .unwrap();
    assert_eq!(cache.get(0, ConfigKind::StreamShared).map(|b| b[0].addr), Some(0x100));
    assert!(cache.get(1, ConfigKind::StreamShared).is_none());
    assert!(cache.get(0, ConfigKind::StreamOp(CmdType::Background)).is_none());

    cache.insert(0, ConfigKind::StreamShared, blocks(0x300)).unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(0, ConfigKind::StreamShared).map(|b| b[0].addr), Some(0x300));

    cache.clear_pipe(0);
    assert_eq!(cache.len(), 0);
    assert!(cache.get(0, ConfigKind::StreamShared).is_none());

    cache.insert(0, ConfigKind::StreamShared, blocks(0x400)).unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.slots(), 2);
    assert_eq!(cache.get(0, ConfigKind::StreamShared).map(|b| b[0].addr), Some(0x400));

    cache.clear();
    assert_eq!(cache.slots(), 0);
}

#[test]
fn tone_mapping_builds_or_reuses_the_lut() {
    let mut s = stream();
    s.tone_map = ToneMapParams {
        uid: 9,
        enable_3dlut: true,
        lut: None,
    };
    let ctx = StreamContext::new(0, &s, &ColorSpace::default(), None, None).unwrap();
    assert!(ctx.tm_enabled());
    let lut = ctx.lut.clone();

    let again = StreamContext::new(0, &s, &ColorSpace::default(), None, lut.clone()).unwrap();
    assert_eq!(again.lut, lut);

    s.tone_map.uid = 0;
    let off = StreamContext::new(0, &s, &ColorSpace::default(), None, lut).unwrap();
    assert!(!off.tm_enabled());
}

#[test]
fn per_pixel_alpha_needs_blending_and_an_alpha_format() {
    let mut s = stream();
    assert!(!StreamContext::new(0, &s, &ColorSpace::default(), None, None).unwrap().per_pixel_alpha);
    s.blend.blending = true;
    assert!(StreamContext::new(0, &s, &ColorSpace::default(), None, None).unwrap().per_pixel_alpha);
    s.surface.format = PixelFormat::Xrgb8888;
    assert!(!StreamContext::new(0, &s, &ColorSpace::default(), None, None).unwrap().per_pixel_alpha);
}

#[test]
fn dummy_scaler_is_a_bypass_with_no_output() {
    let d = ScalerData::dummy(Rect::new(4, 4, 2, 2), true, Rect::new(100, 0, 50, 50));
    assert!(d.is_bypass());
    assert!(d.recout.is_empty());
    assert_eq!(d.src_vp_c, Rect::new(2, 2, 1, 1));
}
