use std::{fmt, str::FromStr};

use crate::{
    card::spec::{Background, CardSpec, DEFAULT_CAPTION, IconSelector},
    foundation::{
        core::Rgba8,
        error::{CardError, CardResult},
    },
    style::color::{GRADIENT_ANGLE_DEG, derive_palette},
};

/// Base color offered for custom cards before the user picks one.
pub const DEFAULT_CUSTOM_BACKGROUND: Rgba8 = Rgba8::rgb(0x63, 0x66, 0xf1);

/// Card color scheme picked by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardStyle {
    /// White text and border on black.
    #[default]
    Black,
    /// Black text and border on white.
    White,
    /// Gradient derived from `background`; text and border use `text`.
    Custom {
        /// Base color the gradient is derived from.
        background: Rgba8,
        /// Text and border color.
        text: Rgba8,
    },
}

/// Non-color card options that every style shares.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardOptions {
    /// Caption printed next to the icon badge.
    pub caption_text: String,
    /// Badge glyph.
    pub icon: IconSelector,
    /// Prompt font size in pixels.
    pub font_size_px: f32,
    /// Share of the card height reserved as blank response area.
    pub response_area_fraction: f64,
    /// Border stroke width in pixels.
    pub border_width: f64,
    /// Outer corner radius in pixels.
    pub corner_radius: f64,
}

impl Default for CardOptions {
    fn default() -> Self {
        let spec = CardSpec::default();
        Self {
            caption_text: DEFAULT_CAPTION.to_string(),
            icon: spec.icon,
            font_size_px: spec.font_size_px,
            response_area_fraction: spec.response_area_fraction,
            border_width: spec.border_width,
            corner_radius: spec.corner_radius,
        }
    }
}

impl CardStyle {
    /// Custom style with the default indigo background and white text.
    pub fn custom_default() -> Self {
        Self::Custom {
            background: DEFAULT_CUSTOM_BACKGROUND,
            text: Rgba8::WHITE,
        }
    }

    /// Resolve this style plus shared options into a concrete, validated [`CardSpec`].
    pub fn resolve(&self, options: &CardOptions) -> CardResult<CardSpec> {
        let (background, text_color, border_color) = match *self {
            Self::Black => (Background::solid(Rgba8::BLACK), Rgba8::WHITE, Rgba8::WHITE),
            Self::White => (Background::solid(Rgba8::WHITE), Rgba8::BLACK, Rgba8::BLACK),
            Self::Custom { background, text } => {
                let palette = derive_palette(background);
                (
                    Background::LinearGradient {
                        start: palette.gradient_start,
                        end: palette.gradient_end,
                        angle_deg: GRADIENT_ANGLE_DEG,
                    },
                    text,
                    text,
                )
            }
        };

        let spec = CardSpec {
            background,
            text_color,
            border_color,
            border_width: options.border_width,
            corner_radius: options.corner_radius,
            font_size_px: options.font_size_px,
            response_area_fraction: options.response_area_fraction,
            caption_text: options.caption_text.clone(),
            icon: options.icon.clone(),
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl fmt::Display for CardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
            Self::Custom { background, text } => write!(f, "custom:{background}:{text}"),
        }
    }
}

impl FromStr for CardStyle {
    type Err = CardError;

    /// Accepts `black`, `white`, `custom` and `custom:<bg-hex>[:<text-hex>]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split(':');
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();
        match head.as_str() {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            "custom" => {
                let background = match parts.next() {
                    Some(hex) => Rgba8::parse_hex(hex)?,
                    None => DEFAULT_CUSTOM_BACKGROUND,
                };
                let text = match parts.next() {
                    Some(hex) => Rgba8::parse_hex(hex)?,
                    None => Rgba8::WHITE,
                };
                if parts.next().is_some() {
                    return Err(CardError::invalid_spec(format!(
                        "style \"{s}\" has too many components"
                    )));
                }
                Ok(Self::Custom { background, text })
            }
            other => Err(CardError::invalid_spec(format!("unknown style \"{other}\""))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/preset.rs"]
mod tests;
