use std::sync::Arc;

use kurbo::Shape;

use crate::foundation::{
    core::{Affine, BezPath, Canvas, Point, Rect, Rgba8},
    error::{CardError, CardResult},
};

/// Flattening tolerance used when outlining strokes and curves.
const PATH_TOLERANCE: f64 = 0.1;

/// Raw RGBA8 pixels read back from a [`Surface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8 order.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// `[r, g, b, a]` at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Paint settings that [`Surface::save`] and [`Surface::restore`] preserve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// Color used by fill operations.
    pub fill: Rgba8,
    /// Color used by stroke operations.
    pub stroke: Rgba8,
    /// Stroke width in user units.
    pub line_width: f64,
    /// User-to-canvas transform applied to every draw.
    pub transform: Affine,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Rgba8::BLACK,
            stroke: Rgba8::BLACK,
            line_width: 1.0,
            transform: Affine::IDENTITY,
        }
    }
}

/// CPU drawing target for one card.
///
/// Wraps a `vello_cpu` render context together with a save/restore stack of [`DrawState`].
/// Every draw call is recorded immediately; pixels materialize in [`Surface::finish`].
pub struct Surface {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("state", &self.state)
            .field("saved", &self.saved.len())
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Fully transparent surface of the given size.
    pub fn new(canvas: Canvas) -> CardResult<Self> {
        let (w, h) = canvas_u16(canvas)?;
        Ok(Self {
            canvas,
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            state: DrawState::default(),
            saved: Vec::new(),
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Current draw state.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Number of states pushed by [`Surface::save`] and not yet restored.
    pub fn saved_depth(&self) -> usize {
        self.saved.len()
    }

    /// Push the current draw state.
    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    /// Pop the most recently saved draw state. Unbalanced calls are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Set the fill color.
    pub fn set_fill_color(&mut self, color: Rgba8) {
        self.state.fill = color;
    }

    /// Set the stroke color.
    pub fn set_stroke_color(&mut self, color: Rgba8) {
        self.state.stroke = color;
    }

    /// Set the stroke width. Non-finite or negative widths disable stroking.
    pub fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    /// Fill `path` with the fill color.
    pub fn fill_path(&mut self, path: &BezPath) {
        let color = self.state.fill;
        self.fill_with_color(path, color);
    }

    /// Fill `rect` with the fill color.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.fill_path(&rect.to_path(PATH_TOLERANCE));
    }

    /// Stroke `path` with the stroke color and line width (miter joins, butt caps).
    pub fn stroke_path(&mut self, path: &BezPath) {
        let width = self.state.line_width;
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        let style = kurbo::Stroke::new(width).with_join(kurbo::Join::Miter);
        let outline = kurbo::stroke(
            path.iter(),
            &style,
            &kurbo::StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        let color = self.state.stroke;
        self.fill_with_color(&outline, color);
    }

    /// Fill `path` with `image`, whose pixel `(0, 0)` sits at the user-space origin.
    pub fn fill_path_with_image(&mut self, path: &BezPath, image: &PaintImage) {
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(image.paint.clone());
        self.ctx.fill_path(&to_cpu_path(path));
    }

    pub(crate) fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        size_px: f32,
        origin: Point,
        color: Rgba8,
        glyphs: Vec<vello_cpu::Glyph>,
    ) {
        self.ctx.set_transform(affine_to_cpu(
            self.state.transform * Affine::translate(origin.to_vec2()),
        ));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx
            .glyph_run(font)
            .font_size(size_px)
            .fill_glyphs(glyphs.into_iter());
    }

    /// Rasterize everything drawn so far and hand back premultiplied pixels.
    pub fn finish(mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn fill_with_color(&mut self, path: &BezPath, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&to_cpu_path(path));
    }
}

/// Image paint uploaded once and usable by [`Surface::fill_path_with_image`].
#[derive(Clone)]
pub struct PaintImage {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for PaintImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PaintImage {
    /// Build a paint from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(rgba8: &[u8], width: u32, height: u32) -> CardResult<Self> {
        let (w, h) = canvas_u16(Canvas { width, height })?;
        if rgba8.len() != width as usize * height as usize * 4 {
            return Err(CardError::invalid_spec("image byte length mismatch"));
        }

        let mut may_have_opacities = false;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for px in rgba8.chunks_exact(4) {
            let [r, g, b, a] = Rgba8::rgba(px[0], px[1], px[2], px[3]).to_premul();
            may_have_opacities |= a != 255;
            pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
        }

        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width,
            height,
        })
    }

    /// Image size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn canvas_u16(canvas: Canvas) -> CardResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| CardError::invalid_spec("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| CardError::invalid_spec("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(CardError::invalid_spec("surface must be at least 1x1"));
    }
    Ok((w, h))
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn to_cpu_path(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        out.push(*el);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
