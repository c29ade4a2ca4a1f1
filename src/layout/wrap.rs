use crate::{
    foundation::{
        core::Point,
        error::{CardError, CardResult},
    },
    text::backend::TextMeasure,
};

/// Placement and sizing for a word-wrap run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapParams {
    /// Left edge and first baseline.
    pub origin: Point,
    /// Widest a line may measure before the next word moves down.
    pub max_width: f64,
    /// Baseline-to-baseline distance.
    pub line_height: f64,
    /// Font size passed to the measurer.
    pub font_size_px: f32,
}

/// One committed output line of [`wrap_text`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaidLine {
    /// Words of the line joined by single spaces.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Baseline.
    pub baseline_y: f64,
    /// Measured width.
    pub width: f64,
}

/// Greedy word wrap.
///
/// Whitespace runs are break opportunities and words are rejoined with a single space. A
/// word joins the current line while the measured result stays within `max_width`; an
/// over-wide word that starts a line stays there alone. Nothing is clipped vertically.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    text: &str,
    params: &WrapParams,
    measure: &mut M,
) -> CardResult<Vec<LaidLine>> {
    if !params.max_width.is_finite() || params.max_width < 0.0 {
        return Err(CardError::invalid_spec("wrap max_width must be finite and >= 0"));
    }
    if !params.line_height.is_finite() {
        return Err(CardError::invalid_spec("wrap line_height must be finite"));
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            current_width = measure.measure(&current, params.font_size_px)?;
            continue;
        }

        let candidate = format!("{current} {word}");
        let candidate_width = measure.measure(&candidate, params.font_size_px)?;
        if candidate_width <= params.max_width {
            current = candidate;
            current_width = candidate_width;
        } else {
            push_line(&mut lines, params, std::mem::take(&mut current), current_width);
            current.push_str(word);
            current_width = measure.measure(&current, params.font_size_px)?;
        }
    }
    if !current.is_empty() {
        push_line(&mut lines, params, current, current_width);
    }

    tracing::debug!(lines = lines.len(), "wrapped prompt text");
    Ok(lines)
}

fn push_line(lines: &mut Vec<LaidLine>, params: &WrapParams, text: String, width: f64) {
    let baseline_y = params.origin.y + params.line_height * lines.len() as f64;
    lines.push(LaidLine {
        text,
        x: params.origin.x,
        baseline_y,
        width,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
