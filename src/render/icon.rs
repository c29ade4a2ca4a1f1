use kurbo::{Circle, Shape};

use crate::{
    card::spec::IconSelector,
    foundation::{
        core::{BezPath, Point, Rgba8},
        error::CardResult,
    },
    render::surface::Surface,
    text::backend::TextBackend,
};

const CURVE_TOLERANCE: f64 = 0.05;

/// Thought-bubble cloud as `(cx, cy, r)` proportions of the badge size.
const CLOUD_LOBES: [(f64, f64, f64); 5] = [
    (0.3, 0.4, 0.2),
    (0.5, 0.35, 0.25),
    (0.7, 0.4, 0.2),
    (0.6, 0.6, 0.2),
    (0.4, 0.6, 0.2),
];

/// Trailing bubbles below the cloud, same encoding as [`CLOUD_LOBES`].
const CLOUD_TRAIL: [(f64, f64, f64); 2] = [(0.2, 0.85, 0.08), (0.1, 0.95, 0.05)];

/// One vector drawing step of an icon badge, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum IconPrimitive {
    /// Stroke `path` at `width`.
    Stroke {
        /// Outline to stroke.
        path: BezPath,
        /// Stroke width.
        width: f64,
    },
    /// Fill `path`.
    Fill {
        /// Area to fill.
        path: BezPath,
    },
    /// Draw `glyph` through the text backend.
    Text {
        /// Text to draw.
        glyph: String,
        /// Start of the baseline.
        baseline: Point,
        /// Font size.
        size_px: f32,
    },
}

/// Vector primitives for `icon` drawn in the `size` x `size` box at `origin`.
///
/// Every coordinate and width is a fixed proportion of `size`, so badges scale uniformly.
/// [`IconSelector::None`] yields no primitives.
pub fn icon_primitives(icon: &IconSelector, origin: Point, size: f64) -> Vec<IconPrimitive> {
    let line_width = size / 10.0;
    let inset = size / 6.0;
    let at = |fx: f64, fy: f64| Point::new(origin.x + size * fx, origin.y + size * fy);

    match icon {
        IconSelector::None => Vec::new(),
        IconSelector::Warning => {
            let mut triangle = BezPath::new();
            triangle.move_to(Point::new(origin.x + size / 2.0, origin.y + inset));
            triangle.line_to(Point::new(origin.x + inset, origin.y + size - inset));
            triangle.line_to(Point::new(origin.x + size - inset, origin.y + size - inset));
            triangle.close_path();

            let mut bar = BezPath::new();
            bar.move_to(at(0.5, 1.0 / 3.0));
            bar.line_to(at(0.5, 0.6));

            let dot = Circle::new(at(0.5, 0.75), size / 15.0).to_path(CURVE_TOLERANCE);

            vec![
                IconPrimitive::Stroke {
                    path: triangle,
                    width: line_width,
                },
                IconPrimitive::Stroke {
                    path: bar,
                    width: line_width,
                },
                IconPrimitive::Fill { path: dot },
            ]
        }
        IconSelector::Thinking => {
            let mut cloud = BezPath::new();
            for (cx, cy, r) in CLOUD_LOBES {
                cloud.extend(Circle::new(at(cx, cy), size * r).path_elements(CURVE_TOLERANCE));
            }

            let mut prims = vec![IconPrimitive::Fill { path: cloud }];
            prims.extend(CLOUD_TRAIL.iter().map(|&(cx, cy, r)| IconPrimitive::Fill {
                path: Circle::new(at(cx, cy), size * r).to_path(CURVE_TOLERANCE),
            }));
            prims
        }
        IconSelector::Blocked => {
            let center = at(0.5, 0.5);
            let ring = Circle::new(center, size / 2.0 - line_width).to_path(CURVE_TOLERANCE);

            let half = size * 0.7 / 2.0;
            let (sin, cos) = std::f64::consts::FRAC_PI_4.sin_cos();
            let mut slash = BezPath::new();
            slash.move_to(Point::new(center.x - cos * half, center.y - sin * half));
            slash.line_to(Point::new(center.x + cos * half, center.y + sin * half));

            vec![
                IconPrimitive::Stroke {
                    path: ring,
                    width: line_width,
                },
                IconPrimitive::Stroke {
                    path: slash,
                    width: line_width,
                },
            ]
        }
        IconSelector::Emoji(glyph) => vec![IconPrimitive::Text {
            glyph: glyph.clone(),
            baseline: Point::new(origin.x, origin.y + size - inset),
            size_px: size as f32,
        }],
    }
}

/// Draw `icon` in `color`. The surface draw state is the same afterwards.
pub fn draw_icon<T: TextBackend + ?Sized>(
    surface: &mut Surface,
    text: &mut T,
    icon: &IconSelector,
    origin: Point,
    size: f64,
    color: Rgba8,
) -> CardResult<()> {
    surface.save();
    surface.set_fill_color(color);
    surface.set_stroke_color(color);

    let mut result = Ok(());
    for prim in icon_primitives(icon, origin, size) {
        result = match prim {
            IconPrimitive::Stroke { path, width } => {
                surface.set_line_width(width);
                surface.stroke_path(&path);
                Ok(())
            }
            IconPrimitive::Fill { path } => {
                surface.fill_path(&path);
                Ok(())
            }
            IconPrimitive::Text {
                glyph,
                baseline,
                size_px,
            } => text.fill_text(surface, &glyph, baseline, size_px, color),
        };
        if result.is_err() {
            break;
        }
    }

    surface.restore();
    result
}

#[cfg(test)]
#[path = "../../tests/unit/render/icon.rs"]
mod tests;
