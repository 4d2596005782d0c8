use std::ops::{Add, Mul, Neg, Sub};

const FRAC_BITS: u32 = 32;
const FRAC_MASK: i64 = (1i64 << FRAC_BITS) - 1;

/// Signed fixed-point number with 31 integer bits and 32 fractional bits.
///
/// Scaling ratios and filter init phases are carried in this format and only narrowed to the
/// register encodings (`u3.19`, `u0.19`, `s2.13`) at programming time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed31_32(i64);

impl Fixed31_32 {
    /// `0.0`
    pub const ZERO: Self = Self(0);
    /// `1.0`
    pub const ONE: Self = Self(1i64 << FRAC_BITS);

    /// Integer value.
    pub const fn from_int(v: i64) -> Self {
        Self(v << FRAC_BITS)
    }

    /// `num / den`, rounded to nearest. `den` must be non-zero.
    pub fn from_fraction(num: i64, den: i64) -> Self {
        debug_assert!(den != 0);
        let n = i128::from(num) << FRAC_BITS;
        let d = i128::from(den);
        let q = if (n < 0) == (d < 0) {
            (n + d / 2) / d
        } else {
            (n - d / 2) / d
        };
        Self(q as i64)
    }

    /// Nearest representable value of `v`.
    pub fn from_f64(v: f64) -> Self {
        Self((v * (1u64 << FRAC_BITS) as f64).round() as i64)
    }

    /// Raw two's complement bits.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Lossy conversion for diagnostics and test assertions.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << FRAC_BITS) as f64
    }

    /// Largest integer `<= self`.
    pub const fn floor(self) -> i64 {
        self.0 >> FRAC_BITS
    }

    /// Smallest integer `>= self`.
    pub const fn ceil(self) -> i64 {
        (self.0 + FRAC_MASK) >> FRAC_BITS
    }

    /// Fractional part, always in `[0, 1)`.
    pub const fn frac(self) -> Self {
        Self(self.0 & FRAC_MASK)
    }

    /// Multiply by an integer.
    pub const fn mul_int(self, v: i64) -> Self {
        Self(self.0 * v)
    }

    /// Divide by a non-zero integer, truncating toward zero.
    pub const fn div_int(self, v: i64) -> Self {
        Self(self.0 / v)
    }

    /// Unsigned 3.19 encoding, saturating.
    pub fn u3d19(self) -> u32 {
        self.unsigned_bits(3, 19)
    }

    /// Unsigned 0.19 encoding of the fractional part.
    pub fn u0d19(self) -> u32 {
        (self.frac().0 >> (FRAC_BITS - 19)) as u32
    }

    /// Signed 2.13 encoding in the low 16 bits (two's complement), rounded and saturated.
    pub fn s2d13(self) -> u32 {
        let shift = FRAC_BITS - 13;
        let rounded = (self.0 + (1i64 << (shift - 1))) >> shift;
        let clamped = rounded.clamp(-(1i64 << 15), (1i64 << 15) - 1);
        (clamped as i16 as u16) as u32
    }

    fn unsigned_bits(self, int_bits: u32, frac_bits: u32) -> u32 {
        if self.0 <= 0 {
            return 0;
        }
        let v = self.0 >> (FRAC_BITS - frac_bits);
        let max = (1i64 << (int_bits + frac_bits)) - 1;
        v.min(max) as u32
    }
}

impl Add for Fixed31_32 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Fixed31_32 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Fixed31_32 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(((i128::from(self.0) * i128::from(rhs.0)) >> FRAC_BITS) as i64)
    }
}

impl Neg for Fixed31_32 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/fixpt.rs"]
mod tests;
