//! Length units
//!
//! OOXML positions shapes in English Metric Units (EMU). Callers of this crate
//! think in centimeters, Word tables think in twips and fonts in points, so
//! [`Length`] stores EMU and converts on the way in and out.

use std::fmt;

pub const EMU_PER_INCH: i64 = 914_400;
pub const EMU_PER_CM: i64 = 360_000;
pub const EMU_PER_PT: i64 = 12_700;
pub const EMU_PER_TWIP: i64 = 635;

/// A length in EMU
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(i64);

impl Length {
    pub const ZERO: Length = Length(0);

    pub const fn emu(emu: i64) -> Self {
        Length(emu)
    }

    pub fn cm(cm: f64) -> Self {
        Length((cm * EMU_PER_CM as f64).round() as i64)
    }

    pub fn pt(pt: f64) -> Self {
        Length((pt * EMU_PER_PT as f64).round() as i64)
    }

    pub fn inches(inches: f64) -> Self {
        Length((inches * EMU_PER_INCH as f64).round() as i64)
    }

    /// Pixels at the given resolution
    pub fn px(px: u32, dpi: f64) -> Self {
        Length::inches(px as f64 / dpi)
    }

    pub const fn as_emu(self) -> i64 {
        self.0
    }

    pub fn as_cm(self) -> f64 {
        self.0 as f64 / EMU_PER_CM as f64
    }

    pub fn as_pt(self) -> f64 {
        self.0 as f64 / EMU_PER_PT as f64
    }

    /// Rounded to whole twips (1/20 pt)
    pub fn as_twips(self) -> i64 {
        (self.0 as f64 / EMU_PER_TWIP as f64).round() as i64
    }

    /// Scale by a factor, rounding to the nearest EMU
    pub fn scale(self, factor: f64) -> Self {
        Length((self.0 as f64 * factor).round() as i64)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

/// Position and optional extent of a box, in EMU
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBox {
    pub left: Length,
    pub top: Length,
    pub width: Option<Length>,
    pub height: Option<Length>,
}

/// Convert a box given in centimeters.
///
/// A zero or missing width/height comes back as `None`, leaving the caller to
/// derive it (e.g. from an image's aspect ratio).
pub fn cm_box(left: f64, top: f64, width: Option<f64>, height: Option<f64>) -> LengthBox {
    let extent = |v: Option<f64>| v.filter(|v| *v != 0.0).map(Length::cm);
    LengthBox {
        left: Length::cm(left),
        top: Length::cm(top),
        width: extent(width),
        height: extent(height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_conversions() {
        assert_eq!(Length::cm(1.0).as_emu(), 360_000);
        assert_eq!(Length::cm(15.2).as_emu(), 5_472_000);
        assert_eq!(Length::cm(2.54), Length::inches(1.0));
        assert!((Length::emu(540_000).as_cm() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_points_and_twips() {
        assert_eq!(Length::pt(12.0).as_emu(), 152_400);
        assert_eq!(Length::pt(1.0).as_twips(), 20);
        assert_eq!(Length::inches(1.0).as_twips(), 1440);
        assert_eq!(Length::px(96, 96.0), Length::inches(1.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Length::cm(2.0);
        assert_eq!((a + a).as_emu(), 1_440_000);
        assert_eq!(a - a, Length::ZERO);
        assert_eq!(a.scale(0.5), Length::cm(1.0));
    }

    #[test]
    fn test_cm_box_drops_zero_extents() {
        let b = cm_box(0.1, 1.6, Some(0.0), Some(13.4));
        assert_eq!(b.left, Length::cm(0.1));
        assert_eq!(b.width, None);
        assert_eq!(b.height, Some(Length::cm(13.4)));

        let b = cm_box(0.0, 0.0, None, None);
        assert_eq!((b.width, b.height), (None, None));
    }
}
