use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    card::{
        prompt::export_file_name,
        spec::{Background, CardSpec},
    },
    foundation::{
        core::Point,
        error::{CardError, CardResult},
        math::PixelDigest,
    },
    layout::{
        geometry::CardLayout,
        wrap::{LaidLine, wrap_text},
    },
    render::{
        batch::CardBatch,
        export::{apply_rounded_mask, encode_png},
        icon::draw_icon,
        surface::{FrameRGBA, PaintImage, Surface},
    },
    style::color::linear_gradient_rgba8,
    text::backend::TextBackend,
};

/// One finished card: pixels, PNG bytes and the suggested file name.
#[derive(Clone, Debug)]
pub struct RenderedCard {
    frame: FrameRGBA,
    png: Vec<u8>,
    file_name: String,
    lines: Vec<LaidLine>,
    overflows_response_area: bool,
}

impl RenderedCard {
    /// Premultiplied RGBA8 pixels after the rounded-corner mask.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Encoded PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Take ownership of the PNG bytes.
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    /// Suggested export file name derived from the prompt.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Prompt lines as laid out on the card.
    pub fn lines(&self) -> &[LaidLine] {
        &self.lines
    }

    /// Whether the prompt ran into the reserved response area.
    pub fn overflows_response_area(&self) -> bool {
        self.overflows_response_area
    }

    /// Stable 64-bit hash of the frame size and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = PixelDigest::default();
        h.update(&self.frame.width.to_le_bytes());
        h.update(&self.frame.height.to_le_bytes());
        h.update(&self.frame.data);
        h.digest()
    }

    /// Write the PNG into `dir` (created when missing) under [`RenderedCard::file_name`].
    pub fn write_to_dir(&self, dir: &Path) -> CardResult<PathBuf> {
        self.write_as(dir, &self.file_name)
    }

    /// Write the PNG into `dir` under `file_name`.
    pub fn write_as(&self, dir: &Path, file_name: &str) -> CardResult<PathBuf> {
        let path = dir.join(file_name);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))
            .and_then(|()| {
                std::fs::write(&path, &self.png)
                    .with_context(|| format!("write png '{}'", path.display()))
            })
            .map_err(|e| CardError::export(format!("{e:#}")))?;
        Ok(path)
    }
}

/// Renders cards with one owned text backend.
#[derive(Debug)]
pub struct CardRenderer<T> {
    text: T,
}

impl<T: TextBackend> CardRenderer<T> {
    /// Renderer drawing text through `text`.
    pub fn new(text: T) -> Self {
        Self { text }
    }

    /// The text backend.
    pub fn text_backend(&mut self) -> &mut T {
        &mut self.text
    }

    /// Give the text backend back.
    pub fn into_inner(self) -> T {
        self.text
    }

    /// Render one card. See [`render_card`].
    pub fn render(&mut self, prompt: &str, spec: &CardSpec) -> CardResult<RenderedCard> {
        render_card(&mut self.text, prompt, spec)
    }

    /// Lazily render one card per prompt, in input order.
    ///
    /// Each item is independent: a failed card does not stop the iterator. Calling this again
    /// starts over from the first prompt.
    pub fn render_batch<'a, S: AsRef<str>>(
        &'a mut self,
        prompts: &'a [S],
        spec: &'a CardSpec,
    ) -> CardBatch<'a, T, S> {
        CardBatch::new(self, prompts, spec)
    }
}

/// Render `prompt` onto a card styled by `spec`.
///
/// `spec` is validated and the text backend readied before anything is drawn. An empty
/// prompt renders a card with no text lines.
#[tracing::instrument(
    level = "debug",
    skip(text, prompt, spec),
    fields(prompt_chars = prompt.chars().count(), icon = spec.icon.name())
)]
pub fn render_card<T: TextBackend + ?Sized>(
    text: &mut T,
    prompt: &str,
    spec: &CardSpec,
) -> CardResult<RenderedCard> {
    spec.validate()?;
    text.ready()?;

    let layout = CardLayout::for_spec(spec);
    let lines = wrap_text(prompt, &layout.text, text)?;
    let mut surface = Surface::new(layout.canvas)?;

    let outer = layout.outer_path();
    match spec.background {
        Background::Solid { color } => {
            surface.set_fill_color(color);
            surface.fill_path(&outer);
        }
        Background::LinearGradient {
            start,
            end,
            angle_deg,
        } => {
            let (w, h) = (layout.canvas.width, layout.canvas.height);
            let pixels = linear_gradient_rgba8(w, h, start, end, angle_deg);
            let paint = PaintImage::from_straight_rgba8(&pixels, w, h)?;
            surface.fill_path_with_image(&outer, &paint);
        }
    }

    surface.set_stroke_color(spec.border_color);
    surface.set_line_width(spec.border_width);
    surface.stroke_path(&layout.border_path());

    for line in &lines {
        text.fill_text(
            &mut surface,
            &line.text,
            Point::new(line.x, line.baseline_y),
            spec.font_size_px,
            spec.text_color,
        )?;
    }

    let overflows_response_area = layout.overflows_response_area(&lines);
    if overflows_response_area {
        tracing::warn!(
            lines = lines.len(),
            response_top = layout.response_area.y0,
            "prompt text runs into the response area"
        );
    }

    draw_icon(
        &mut surface,
        text,
        &spec.icon,
        layout.icon_origin,
        layout.icon_size,
        spec.text_color,
    )?;
    if !spec.caption_text.is_empty() {
        text.fill_text(
            &mut surface,
            &spec.caption_text,
            layout.caption_origin,
            layout.caption_size_px,
            spec.text_color,
        )?;
    }

    let mut frame = surface.finish();
    apply_rounded_mask(&mut frame, layout.outer_radius);
    let png = encode_png(&frame)?;
    let file_name = export_file_name(prompt);
    tracing::debug!(file_name = %file_name, bytes = png.len(), "rendered card");

    Ok(RenderedCard {
        frame,
        png,
        file_name,
        lines,
        overflows_response_area,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
