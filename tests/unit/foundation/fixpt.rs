use super::*;

#[test]
fn fraction_rounds_to_nearest() {
    let half = Fixed31_32::from_fraction(1, 2);
    assert_eq!(half.raw(), 1i64 << 31);
    let third = Fixed31_32::from_fraction(1, 3);
    assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-9);
    let neg = Fixed31_32::from_fraction(-3, 2);
    assert_eq!(neg.floor(), -2);
    assert_eq!(neg.ceil(), -1);
}

#[test]
fn floor_ceil_frac_agree() {
    let v = Fixed31_32::from_fraction(7, 4);
    assert_eq!(v.floor(), 1);
    assert_eq!(v.ceil(), 2);
    assert_eq!(v.frac(), Fixed31_32::from_fraction(3, 4));
    assert_eq!(Fixed31_32::from_int(5).ceil(), 5);
}

#[test]
fn arithmetic_matches_float() {
    let a = Fixed31_32::from_f64(1.25);
    let b = Fixed31_32::from_f64(-0.5);
    assert_eq!((a + b).to_f64(), 0.75);
    assert_eq!((a - b).to_f64(), 1.75);
    assert_eq!((a * b).to_f64(), -0.625);
    assert_eq!(a.mul_int(4), Fixed31_32::from_int(5));
    assert_eq!(Fixed31_32::from_int(3).div_int(2).to_f64(), 1.5);
}

#[test]
fn register_encodings() {
    assert_eq!(Fixed31_32::ONE.u3d19(), 1 << 19);
    assert_eq!(Fixed31_32::from_fraction(1, 2).u3d19(), 1 << 18);
    assert_eq!(Fixed31_32::from_int(100).u3d19(), (1 << 22) - 1);
    assert_eq!(Fixed31_32::from_int(-1).u3d19(), 0);
    assert_eq!(Fixed31_32::from_fraction(5, 2).u0d19(), 1 << 18);
    assert_eq!(Fixed31_32::ONE.s2d13(), 0x2000);
    assert_eq!((-Fixed31_32::ONE).s2d13(), 0xE000);
}
