use crate::{
    foundation::{
        core::{Point, Rgba8},
        error::CardResult,
    },
    render::surface::Surface,
};

/// Width measurement used by the word-wrap engine.
pub trait TextMeasure {
    /// Horizontal advance of `text` set at `size_px`, in pixels.
    fn measure(&mut self, text: &str, size_px: f32) -> CardResult<f64>;
}

/// A text measurer that can also draw what it measures.
///
/// The compositor calls [`TextBackend::ready`] once per card before any drawing, so a
/// backend that cannot load a font fails the card early with
/// [`CardError::MeasurementUnavailable`](crate::CardError::MeasurementUnavailable).
pub trait TextBackend: TextMeasure {
    /// Make sure the backend can measure and draw.
    fn ready(&mut self) -> CardResult<()>;

    /// Draw a single line of `text` with its baseline starting at `baseline_origin`.
    ///
    /// Implementations must leave the surface draw state as they found it.
    fn fill_text(
        &mut self,
        surface: &mut Surface,
        text: &str,
        baseline_origin: Point,
        size_px: f32,
        color: Rgba8,
    ) -> CardResult<()>;
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
    fn measure(&mut self, text: &str, size_px: f32) -> CardResult<f64> {
        (**self).measure(text, size_px)
    }
}

impl<T: TextBackend + ?Sized> TextBackend for Box<T> {
    fn ready(&mut self) -> CardResult<()> {
        (**self).ready()
    }

    fn fill_text(
        &mut self,
        surface: &mut Surface,
        text: &str,
        baseline_origin: Point,
        size_px: f32,
        color: Rgba8,
    ) -> CardResult<()> {
        (**self).fill_text(surface, text, baseline_origin, size_px, color)
    }
}
