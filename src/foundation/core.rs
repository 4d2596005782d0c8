/// Integer rectangle in pixel space.
///
/// `x`/`y` may be negative for stream destinations that hang off the target; every consumer clips
/// against the target before using the rectangle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Construct a rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlapping region of two rectangles, `None` when they do not overlap.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Return `true` when `other` lies fully inside `self`.
    pub fn contains_rect(self, other: Rect) -> bool {
        i64::from(other.x) >= i64::from(self.x)
            && i64::from(other.y) >= i64::from(self.y)
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Same rectangle restricted to the columns `[x0, x1)`.
    pub(crate) fn with_columns(self, x0: i64, x1: i64) -> Rect {
        Rect {
            x: x0 as i32,
            y: self.y,
            width: (x1 - x0).max(0) as u32,
            height: self.height,
        }
    }
}

/// Straight-alpha RGBA color with components in `[0, 1]`.
///
/// Equality compares component bit patterns: NaN equals itself and `-0.0` differs from `0.0`.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Construct a color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Return `true` when every component lies in `[0, 1]` (NaN fails).
    pub fn is_normalized(self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    fn bits(self) -> [u32; 4] {
        [self.r, self.g, self.b, self.a].map(f32::to_bits)
    }

    /// Quantize one component to an unsigned `bits`-wide integer.
    pub(crate) fn unorm(c: f32, bits: u32) -> u32 {
        let max = ((1u64 << bits) - 1) as f32;
        (c.clamp(0.0, 1.0) * max).round() as u32
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Color {}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
