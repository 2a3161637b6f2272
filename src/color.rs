//! Color types and the categorical bar palette.
//!
//! Bars are filled from a fixed 20-entry categorical palette, cycling by bin
//! index, so a given bin keeps its color across redraws.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_u24(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    ///
    /// Returns `None` for anything that is not exactly six hex digits.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Self::from_u24)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// CSS color string: `rgb(..)` when opaque, `rgba(..)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

/// The 20-color categorical palette used for bar fills.
pub const CATEGORY20: [Rgba; 20] = [
    Rgba::from_u24(0x1f77b4),
    Rgba::from_u24(0xaec7e8),
    Rgba::from_u24(0xff7f0e),
    Rgba::from_u24(0xffbb78),
    Rgba::from_u24(0x2ca02c),
    Rgba::from_u24(0x98df8a),
    Rgba::from_u24(0xd62728),
    Rgba::from_u24(0xff9896),
    Rgba::from_u24(0x9467bd),
    Rgba::from_u24(0xc5b0d5),
    Rgba::from_u24(0x8c564b),
    Rgba::from_u24(0xc49c94),
    Rgba::from_u24(0xe377c2),
    Rgba::from_u24(0xf7b6d2),
    Rgba::from_u24(0x7f7f7f),
    Rgba::from_u24(0xc7c7c7),
    Rgba::from_u24(0xbcbd22),
    Rgba::from_u24(0xdbdb8d),
    Rgba::from_u24(0x17becf),
    Rgba::from_u24(0x9edae5),
];

/// Pick the palette entry for a bin index, cycling through the palette.
///
/// An empty palette falls back to [`CATEGORY20`].
#[must_use]
pub fn palette_color(palette: &[Rgba], index: usize) -> Rgba {
    if palette.is_empty() {
        return CATEGORY20[index % CATEGORY20.len()];
    }
    palette[index % palette.len()]
}
