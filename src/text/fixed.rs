use crate::{
    foundation::{
        core::{Point, Rect, Rgba8},
        error::{CardError, CardResult},
    },
    render::surface::Surface,
    text::backend::{TextBackend, TextMeasure},
};

/// Advance of every character, as a fraction of the font size.
pub const DEFAULT_ADVANCE_EM: f64 = 0.55;

/// Height of the box drawn for each visible character, as a fraction of the font size.
const BOX_HEIGHT_EM: f64 = 0.7;

/// Font-free text backend with a fixed advance per character.
///
/// Every `char` advances by the same amount and visible characters are drawn as solid boxes
/// sitting on the baseline. Output depends on nothing but the input, which makes it the
/// backend of choice for tests, headless previews and machines without fonts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceText {
    advance_em: f64,
}

impl Default for FixedAdvanceText {
    fn default() -> Self {
        Self {
            advance_em: DEFAULT_ADVANCE_EM,
        }
    }
}

impl FixedAdvanceText {
    /// Backend using [`DEFAULT_ADVANCE_EM`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with a custom per-character advance (in ems).
    pub fn with_advance_em(advance_em: f64) -> CardResult<Self> {
        if !advance_em.is_finite() || advance_em <= 0.0 {
            return Err(CardError::measurement_unavailable(
                "fixed advance must be finite and > 0",
            ));
        }
        Ok(Self { advance_em })
    }

    /// Per-character advance in ems.
    pub fn advance_em(&self) -> f64 {
        self.advance_em
    }

    fn advance_px(&self, size_px: f32) -> f64 {
        f64::from(size_px) * self.advance_em
    }
}

impl TextMeasure for FixedAdvanceText {
    fn measure(&mut self, text: &str, size_px: f32) -> CardResult<f64> {
        Ok(text.chars().count() as f64 * self.advance_px(size_px))
    }
}

impl TextBackend for FixedAdvanceText {
    fn ready(&mut self) -> CardResult<()> {
        Ok(())
    }

    fn fill_text(
        &mut self,
        surface: &mut Surface,
        text: &str,
        baseline_origin: Point,
        size_px: f32,
        color: Rgba8,
    ) -> CardResult<()> {
        let advance = self.advance_px(size_px);
        let top = baseline_origin.y - f64::from(size_px) * BOX_HEIGHT_EM;
        let inset = advance * 0.1;

        surface.save();
        surface.set_fill_color(color);
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let x0 = baseline_origin.x + i as f64 * advance;
            surface.fill_rect(Rect::new(
                x0 + inset,
                top,
                x0 + advance - inset,
                baseline_origin.y,
            ));
        }
        surface.restore();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fixed.rs"]
mod tests;
