use super::*;

#[test]
fn intersect_clips_to_overlap() {
    let target = Rect::new(0, 0, 1920, 1080);
    let hanging = Rect::new(-100, 500, 400, 1000);
    let clipped = target.intersect(hanging).unwrap();
    assert_eq!(clipped, Rect::new(0, 500, 300, 580));
}

#[test]
fn intersect_of_disjoint_rects_is_none() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(10, 0, 10, 10);
    assert_eq!(a.intersect(b), None);
}

#[test]
fn contains_rect_is_inclusive_of_edges() {
    let outer = Rect::new(0, 0, 100, 100);
    assert!(outer.contains_rect(Rect::new(0, 0, 100, 100)));
    assert!(!outer.contains_rect(Rect::new(1, 0, 100, 100)));
}

#[test]
fn color_range_check_rejects_nan() {
    assert!(Color::new(0.0, 0.5, 1.0, 1.0).is_normalized());
    assert!(!Color::new(f32::NAN, 0.0, 0.0, 1.0).is_normalized());
    assert!(!Color::new(1.5, 0.0, 0.0, 1.0).is_normalized());
}

#[test]
fn unorm_rounds_and_clamps() {
    assert_eq!(Color::unorm(1.0, 10), 1023);
    assert_eq!(Color::unorm(0.5, 8), 128);
    assert_eq!(Color::unorm(-1.0, 12), 0);
}
