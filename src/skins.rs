//! Skins and block palettes
//!
//! A skin is a purchasable colour palette. The simulation only ever asks a
//! [`Palette`] for a colour when it spawns a block or a particle.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 24-bit RGB colour, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::rgb)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid colour {s:?}"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Colours used when no skin palette is available
pub const FALLBACK_COLORS: [Color; 4] = [
    Color::rgb(0xFF6B6B),
    Color::rgb(0x4ECDC4),
    Color::rgb(0x45B7D1),
    Color::rgb(0x96CEB4),
];

/// Ordered set of colours new blocks are drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::fallback()
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_COLORS.to_vec())
    }

    pub fn colors(&self) -> &[Color] {
        if self.colors.is_empty() {
            &FALLBACK_COLORS
        } else {
            &self.colors
        }
    }

    /// Uniform random pick; an empty palette picks from the fallback colours
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        let colors = self.colors();
        colors[rng.random_range(0..colors.len())]
    }
}

/// Id of the skin every player owns
pub const DEFAULT_SKIN_ID: &str = "default";

/// A purchasable palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub id: String,
    pub name: String,
    pub colors: Vec<Color>,
    /// Price in accumulated points
    pub price: u64,
    pub unlocked: bool,
}

impl Skin {
    fn new(id: &str, name: &str, colors: [u32; 4], price: u64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            colors: colors.into_iter().map(Color::rgb).collect(),
            price,
            unlocked: id == DEFAULT_SKIN_ID,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.colors.clone())
    }
}

/// Built-in skins, cheapest first. Only the default skin starts unlocked.
pub fn catalog() -> Vec<Skin> {
    vec![
        Skin::new(
            DEFAULT_SKIN_ID,
            "Classic",
            [0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4],
            0,
        ),
        Skin::new("neon", "Neon", [0xFF00FF, 0x00FFFF, 0xFFFF00, 0xFF0080], 100),
        Skin::new("ocean", "Ocean", [0x0066CC, 0x0099CC, 0x00CCCC, 0x66CCFF], 150),
        Skin::new("sunset", "Sunset", [0xFF6B35, 0xF7931E, 0xFFD23F, 0xFF8C42], 200),
        Skin::new("galaxy", "Galaxy", [0x8B00FF, 0x4B0082, 0x9400D3, 0xDA70D6], 300),
    ]
}

/// Catalog with the given ids marked unlocked (the default skin always is)
pub fn catalog_with_unlocked<'a>(unlocked: impl IntoIterator<Item = &'a str>) -> Vec<Skin> {
    let unlocked: Vec<&str> = unlocked.into_iter().collect();
    let mut skins = catalog();
    for skin in &mut skins {
        skin.unlocked = skin.id == DEFAULT_SKIN_ID || unlocked.contains(&skin.id.as_str());
    }
    skins
}
