//! RGB colors and the named house palette

use std::fmt;

/// 8-bit per channel RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB`, as `srgbClr` and `w:color` expect
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `RRGGBB`, with or without a leading `#`
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Named colors used across decks.
///
/// The animal names colour per-species series in charts and tables.
pub struct Palette;

impl Palette {
    pub const GREEN_MAIN: RgbColor = RgbColor::new(112, 182, 88);
    pub const GREEN_DARK: RgbColor = RgbColor::new(33, 84, 37);
    pub const GREY_DARK: RgbColor = RgbColor::new(49, 45, 49);
    pub const DOG: RgbColor = RgbColor::new(191, 209, 67);
    pub const CAT: RgbColor = RgbColor::new(232, 132, 65);
    pub const SMALL_PET: RgbColor = RgbColor::new(212, 153, 59);
    pub const FISH: RgbColor = RgbColor::new(40, 58, 140);
    pub const BIRD: RgbColor = RgbColor::new(109, 173, 218);
    pub const REPTILE: RgbColor = RgbColor::new(101, 38, 57);
    pub const BLACK: RgbColor = RgbColor::BLACK;
    pub const WHITE: RgbColor = RgbColor::WHITE;

    const NAMED: [(&'static str, RgbColor); 11] = [
        ("green_main", Self::GREEN_MAIN),
        ("green_dark", Self::GREEN_DARK),
        ("grey_dark", Self::GREY_DARK),
        ("dog", Self::DOG),
        ("cat", Self::CAT),
        ("small_pet", Self::SMALL_PET),
        ("fish", Self::FISH),
        ("bird", Self::BIRD),
        ("reptile", Self::REPTILE),
        ("black", Self::BLACK),
        ("white", Self::WHITE),
    ];

    /// Look a color up by its palette name
    pub fn get(name: &str) -> Option<RgbColor> {
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    /// All `(name, color)` pairs in palette order
    pub fn iter() -> impl Iterator<Item = (&'static str, RgbColor)> {
        Self::NAMED.into_iter()
    }
}
