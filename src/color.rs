use crate::error::{Error, Result};

/// An RGBA color with float components in `0.0..=1.0`.
///
/// An alpha of `-1.0` is the "unset" sentinel ([`Color::UNSET`]). Passing
/// an unset color for the fill or stroke of a primitive disables that part
/// of the primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Unpack a color in draw-buffer layout (R in the low byte, A in the high byte).
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as f32 / 255.0,
            g: ((packed >> 8) & 0xFF) as f32 / 255.0,
            b: ((packed >> 16) & 0xFF) as f32 / 255.0,
            a: ((packed >> 24) & 0xFF) as f32 / 255.0,
        }
    }

    /// Build a color from a component slice.
    ///
    /// An empty slice means unset, three components are RGB with full
    /// alpha and four are RGBA. Anything else is [`Error::InvalidShape`].
    pub fn from_components(components: &[f64]) -> Result<Self> {
        match *components {
            [] => Ok(Self::UNSET),
            [r, g, b] => Ok(Self::rgb(r as f32, g as f32, b as f32)),
            [r, g, b, a] => Ok(Self::rgba(r as f32, g as f32, b as f32, a as f32)),
            _ => Err(Error::InvalidShape {
                what: "color",
                expected: "0, 3 or 4 components",
                actual: components.len(),
            }),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.a == -1.0
    }

    /// Resolve to a packed draw-buffer color, multiplying alpha by
    /// `global_alpha`. Unset colors resolve to `None`.
    pub fn resolve(&self, global_alpha: f32) -> Option<u32> {
        if self.is_unset() {
            return None;
        }
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
        Some(
            channel(self.r)
                | (channel(self.g) << 8)
                | (channel(self.b) << 16)
                | (channel(self.a * global_alpha) << 24),
        )
    }

    pub const UNSET: Color = Color::rgba(0.0, 0.0, 0.0, -1.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_packed(packed)
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Option<Color>> for Color {
    fn from(color: Option<Color>) -> Self {
        color.unwrap_or(Self::UNSET)
    }
}
