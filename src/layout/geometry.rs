use kurbo::{RoundedRect, Shape};

use crate::{
    card::spec::{CARD_CANVAS, CardSpec},
    foundation::core::{BezPath, Canvas, Point, Rect},
    layout::wrap::{LaidLine, WrapParams},
};

/// Left edge of prompt lines and of the icon badge.
pub const CONTENT_LEFT: f64 = 50.0;
/// Baseline of the first prompt line.
pub const FIRST_BASELINE: f64 = 100.0;
/// Widest a prompt line may measure.
pub const TEXT_MAX_WIDTH: f64 = 600.0;
/// Distance from the card edge to the border rectangle.
pub const BORDER_INSET: f64 = 15.0;
/// How much tighter the border corners are than the outer corners.
pub const BORDER_RADIUS_SHRINK: f64 = 5.0;
/// Line height per pixel of font size (55px lines at the 42px reference size).
pub const LINE_HEIGHT_RATIO: f64 = 55.0 / 42.0;
/// Distance from the bottom edge to the top of the footer row.
pub const FOOTER_OFFSET: f64 = 100.0;
/// Blank distance between the response area and the footer row.
pub const FOOTER_GAP: f64 = 20.0;
/// Icon badge edge length.
pub const ICON_SIZE: f64 = 30.0;
/// Left edge of the caption.
pub const CAPTION_LEFT: f64 = 95.0;
/// Distance from the bottom edge to the caption baseline.
pub const CAPTION_BASELINE_OFFSET: f64 = 75.0;
/// Caption font size.
pub const CAPTION_SIZE_PX: f32 = 22.0;

/// Resolved geometry of one card, in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// Output size.
    pub canvas: Canvas,
    /// Outer corner radius; pixels outside the rounded canvas rect end up transparent.
    pub outer_radius: f64,
    /// Centerline rectangle of the border stroke.
    pub border_rect: Rect,
    /// Corner radius of the border stroke.
    pub border_radius: f64,
    /// Word-wrap placement for the prompt.
    pub text: WrapParams,
    /// Blank region kept free for written responses.
    pub response_area: Rect,
    /// Top-left corner of the icon badge.
    pub icon_origin: Point,
    /// Icon badge edge length.
    pub icon_size: f64,
    /// Start of the caption baseline.
    pub caption_origin: Point,
    /// Caption font size.
    pub caption_size_px: f32,
}

impl CardLayout {
    /// Geometry for `spec` on the fixed card canvas.
    pub fn for_spec(spec: &CardSpec) -> Self {
        let canvas = CARD_CANVAS;
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let footer_top = h - FOOTER_OFFSET;

        let response_bottom = footer_top - FOOTER_GAP;
        let response_height = spec.response_area_fraction * h;

        Self {
            canvas,
            outer_radius: spec.corner_radius,
            border_rect: Rect::new(BORDER_INSET, BORDER_INSET, w - BORDER_INSET, h - BORDER_INSET),
            border_radius: (spec.corner_radius - BORDER_RADIUS_SHRINK).max(0.0),
            text: WrapParams {
                origin: Point::new(CONTENT_LEFT, FIRST_BASELINE),
                max_width: TEXT_MAX_WIDTH,
                line_height: f64::from(spec.font_size_px) * LINE_HEIGHT_RATIO,
                font_size_px: spec.font_size_px,
            },
            response_area: Rect::new(
                CONTENT_LEFT,
                response_bottom - response_height,
                CONTENT_LEFT + TEXT_MAX_WIDTH,
                response_bottom,
            ),
            icon_origin: Point::new(CONTENT_LEFT, footer_top),
            icon_size: ICON_SIZE,
            caption_origin: Point::new(CAPTION_LEFT, h - CAPTION_BASELINE_OFFSET),
            caption_size_px: CAPTION_SIZE_PX,
        }
    }

    /// Outline of the whole card.
    pub fn outer_path(&self) -> BezPath {
        RoundedRect::from_rect(self.canvas.rect(), self.outer_radius).to_path(0.1)
    }

    /// Centerline of the border stroke.
    pub fn border_path(&self) -> BezPath {
        RoundedRect::from_rect(self.border_rect, self.border_radius).to_path(0.1)
    }

    /// Whether any laid-out line sits below the top of the response area.
    pub fn overflows_response_area(&self, lines: &[LaidLine]) -> bool {
        lines
            .last()
            .is_some_and(|line| line.baseline_y > self.response_area.y0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
