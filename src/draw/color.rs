//! RGBA color type and the named drawing palette.

/// Represents an RGBA color with byte components.
///
/// All components are in the range 0 (minimum) to 255 (maximum).
///
/// # Examples
///
/// ```
/// use drawpp::draw::Color;
/// let red = Color { r: 255, g: 0, b: 0, a: 255 };
/// let semi_transparent_blue = Color::new(0, 0, 255, 128);
/// assert_ne!(red, semi_transparent_blue);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha/transparency (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Looks up a palette color by name (case-insensitive, `-` and `_` interchangeable).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        PALETTE
            .iter()
            .find(|(palette_name, _)| *palette_name == normalized)
            .map(|(_, color)| *color)
    }

    /// Returns the palette name for an exact match, if any.
    pub fn name(&self) -> Option<&'static str> {
        PALETTE
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
    }

    /// Returns the color as premultiplied ARGB packed into a `u32`.
    ///
    /// This is the in-memory layout of cairo's `ARgb32` format.
    pub fn to_premultiplied_argb(self) -> u32 {
        let a = self.a as u32;
        let premultiply = |c: u8| (c as u32 * a + 127) / 255;
        (a << 24) | (premultiply(self.r) << 16) | (premultiply(self.g) << 8) | premultiply(self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a),
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);

// Shades of gray
pub const GRAY: Color = Color::rgb(128, 128, 128);
pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);

// Warm
pub const ORANGE: Color = Color::rgb(255, 165, 0);
pub const BROWN: Color = Color::rgb(165, 42, 42);
pub const PINK: Color = Color::rgb(255, 192, 203);
pub const CORAL: Color = Color::rgb(255, 127, 80);
pub const GOLD: Color = Color::rgb(255, 215, 0);

// Cool
pub const PURPLE: Color = Color::rgb(128, 0, 128);
pub const INDIGO: Color = Color::rgb(75, 0, 130);
pub const TURQUOISE: Color = Color::rgb(64, 224, 208);
pub const NAVY: Color = Color::rgb(0, 0, 128);
pub const TEAL: Color = Color::rgb(0, 128, 128);

// Nature
pub const FOREST_GREEN: Color = Color::rgb(34, 139, 34);
pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
pub const OLIVE: Color = Color::rgb(128, 128, 0);
pub const SALMON: Color = Color::rgb(250, 128, 114);
pub const BEIGE: Color = Color::rgb(245, 245, 220);

/// Fully transparent color, the initial contents of a fresh surface.
pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

/// Every named color, in lookup order.
pub const PALETTE: &[(&str, Color)] = &[
    ("black", BLACK),
    ("white", WHITE),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("gray", GRAY),
    ("light_gray", LIGHT_GRAY),
    ("dark_gray", DARK_GRAY),
    ("orange", ORANGE),
    ("brown", BROWN),
    ("pink", PINK),
    ("coral", CORAL),
    ("gold", GOLD),
    ("purple", PURPLE),
    ("indigo", INDIGO),
    ("turquoise", TURQUOISE),
    ("navy", NAVY),
    ("teal", TEAL),
    ("forest_green", FOREST_GREEN),
    ("sky_blue", SKY_BLUE),
    ("olive", OLIVE),
    ("salmon", SALMON),
    ("beige", BEIGE),
    ("transparent", TRANSPARENT),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_is_case_and_separator_insensitive() {
        assert_eq!(Color::from_name("Sky-Blue"), Some(SKY_BLUE));
        assert_eq!(Color::from_name("forest_green"), Some(FOREST_GREEN));
        assert_eq!(Color::from_name(" RED "), Some(RED));
        assert!(Color::from_name("chartreuse").is_none());
    }

    #[test]
    fn display_prefers_palette_names() {
        assert_eq!(NAVY.to_string(), "navy");
        assert_eq!(Color::new(1, 2, 3, 4).to_string(), "rgba(1, 2, 3, 4)");
    }

    #[test]
    fn premultiplied_argb_scales_channels_by_alpha() {
        assert_eq!(WHITE.to_premultiplied_argb(), 0xFFFF_FFFF);
        assert_eq!(TRANSPARENT.to_premultiplied_argb(), 0);
        assert_eq!(Color::new(255, 0, 0, 128).to_premultiplied_argb(), 0x8080_0000);
    }
}
