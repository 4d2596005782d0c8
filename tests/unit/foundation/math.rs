use super::*;

#[test]
fn ceil_div_and_rounding() {
    assert_eq!(ceil_div(3840, 1024), 4);
    assert_eq!(ceil_div(1024, 1024), 1);
    assert_eq!(round_up_to_multiple(3, 2), 4);
    assert_eq!(round_up_to_multiple(4, 2), 4);
    assert_eq!(ceil_div_signed(7, 2), 4);
    assert_eq!(ceil_div_signed(-7, 2), -3);
    assert_eq!(ceil_div_signed(6, 3), 2);
}

#[test]
fn ratio_in_thousandths() {
    assert_eq!(ratio_1000(3840, 1920), 2000);
    assert_eq!(ratio_1000(480, 1920), 250);
    assert_eq!(ratio_1000(1, 0), u64::MAX);
}

#[test]
fn taps_follow_scaling_direction() {
    assert_eq!(optimal_taps(1920, 1920, 8), 1);
    assert_eq!(optimal_taps(1920, 3840, 8), 4);
    // 1.5x downscale: 2 * ceil(1.5) = 4
    assert_eq!(optimal_taps(1920, 1280, 8), 4);
    // 3x downscale: 2 * 3 = 6
    assert_eq!(optimal_taps(3840, 1280, 8), 6);
    // 4x downscale saturates at the hardware limit
    assert_eq!(optimal_taps(3840, 960, 8), 8);
}

#[test]
fn chroma_taps_halve_luma() {
    assert_eq!(chroma_taps(1), 1);
    assert_eq!(chroma_taps(4), 2);
    assert_eq!(chroma_taps(6), 4);
    assert_eq!(chroma_taps(8), 4);
}

#[test]
fn line_buffer_bounds_segment_width() {
    assert_eq!(effective_segment_width(1024, 6144, 4), 1024);
    assert_eq!(effective_segment_width(1024, 6144, 8), 768);
}
