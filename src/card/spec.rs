use std::{fmt, str::FromStr};

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{CardError, CardResult},
};

/// Fixed output size of every card, in pixels.
pub const CARD_CANVAS: Canvas = Canvas {
    width: 700,
    height: 1000,
};

/// Caption printed next to the icon badge when the caller does not pick one.
pub const DEFAULT_CAPTION: &str = "Track Against Humanity";

/// Glyph used for [`IconSelector::Emoji`] when parsing a bare `emoji` selector.
pub const DEFAULT_EMOJI: &str = "\u{1F3AE}";

/// Card background fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// A single flat color.
    Solid {
        /// Fill color.
        color: Rgba8,
    },
    /// A two-stop linear gradient across the whole card.
    LinearGradient {
        /// Color at the start of the gradient line.
        start: Rgba8,
        /// Color at the end of the gradient line.
        end: Rgba8,
        /// CSS-style direction: 0 points up, 90 right, 135 toward the bottom-right corner.
        angle_deg: f64,
    },
}

impl Background {
    /// Build a solid background.
    pub fn solid(color: Rgba8) -> Self {
        Self::Solid { color }
    }
}

/// Which badge glyph is drawn in the card's bottom-left corner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "glyph", rename_all = "snake_case")]
pub enum IconSelector {
    /// No badge is drawn.
    None,
    /// Outlined warning triangle with an exclamation mark.
    #[default]
    Warning,
    /// Thought-bubble cloud.
    Thinking,
    /// Prohibition circle with a diagonal slash.
    Blocked,
    /// Arbitrary short text or emoji drawn through the text backend.
    Emoji(String),
}

impl IconSelector {
    /// Stable lower-case name used by the CLI and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Warning => "warning",
            Self::Thinking => "thinking",
            Self::Blocked => "blocked",
            Self::Emoji(_) => "emoji",
        }
    }
}

impl fmt::Display for IconSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emoji(glyph) => write!(f, "emoji:{glyph}"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for IconSelector {
    type Err = CardError;

    /// Accepts `none`, `warning` (alias `triangle`), `thinking`, `blocked` (alias `block`),
    /// `emoji` and `emoji:<glyph>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(glyph) = trimmed.strip_prefix("emoji:") {
            if glyph.is_empty() {
                return Err(CardError::invalid_spec("emoji icon needs a glyph"));
            }
            return Ok(Self::Emoji(glyph.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "warning" | "triangle" => Ok(Self::Warning),
            "thinking" => Ok(Self::Thinking),
            "blocked" | "block" => Ok(Self::Blocked),
            "emoji" => Ok(Self::Emoji(DEFAULT_EMOJI.to_string())),
            other => Err(CardError::invalid_spec(format!("unknown icon \"{other}\""))),
        }
    }
}

/// Fully resolved style of one card.
///
/// A `CardSpec` is immutable input to the compositor: callers build a fresh one (usually via
/// [`crate::CardStyle::resolve`]) and hand it to every render call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardSpec {
    /// Background fill inside the rounded card outline.
    pub background: Background,
    /// Color of prompt text, caption and icon badge.
    pub text_color: Rgba8,
    /// Color of the inset border.
    pub border_color: Rgba8,
    /// Border stroke width in pixels.
    pub border_width: f64,
    /// Outer corner radius in pixels.
    pub corner_radius: f64,
    /// Prompt font size in pixels.
    pub font_size_px: f32,
    /// Share of the card height kept blank as the response area (`0..=1`).
    pub response_area_fraction: f64,
    /// Caption printed to the right of the icon badge.
    pub caption_text: String,
    /// Badge glyph.
    pub icon: IconSelector,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            background: Background::solid(Rgba8::BLACK),
            text_color: Rgba8::WHITE,
            border_color: Rgba8::WHITE,
            border_width: 6.0,
            corner_radius: 20.0,
            font_size_px: 42.0,
            response_area_fraction: 0.3,
            caption_text: DEFAULT_CAPTION.to_string(),
            icon: IconSelector::Warning,
        }
    }
}

impl CardSpec {
    /// Reject structurally invalid specs before any drawing happens.
    pub fn validate(&self) -> CardResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(CardError::invalid_spec(
                "font_size_px must be finite and > 0",
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(CardError::invalid_spec(
                "border_width must be finite and >= 0",
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(CardError::invalid_spec(
                "corner_radius must be finite and >= 0",
            ));
        }
        let max_radius = f64::from(CARD_CANVAS.width.min(CARD_CANVAS.height)) / 2.0;
        if self.corner_radius > max_radius {
            return Err(CardError::invalid_spec(format!(
                "corner_radius must be <= {max_radius}"
            )));
        }
        if !self.response_area_fraction.is_finite()
            || !(0.0..=1.0).contains(&self.response_area_fraction)
        {
            return Err(CardError::invalid_spec(
                "response_area_fraction must be within 0..=1",
            ));
        }
        if let Background::LinearGradient { angle_deg, .. } = self.background
            && !angle_deg.is_finite()
        {
            return Err(CardError::invalid_spec("gradient angle must be finite"));
        }
        if let IconSelector::Emoji(glyph) = &self.icon
            && glyph.trim().is_empty()
        {
            return Err(CardError::invalid_spec("emoji icon needs a glyph"));
        }
        Ok(())
    }

    /// Load a spec from JSON and validate it.
    pub fn from_json(json: &str) -> CardResult<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> CardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/spec.rs"]
mod tests;
