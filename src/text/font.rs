use std::{borrow::Cow, path::PathBuf, sync::Arc};

use crate::{
    foundation::{
        core::{Point, Rgba8},
        error::{CardError, CardResult},
    },
    render::surface::Surface,
    text::backend::{TextBackend, TextMeasure},
};

/// Environment variable naming a font file to use instead of the system font.
pub const FONT_ENV_VAR: &str = "PROMPTCARDS_FONT";

/// Where [`FontText`] gets its font bytes from.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// In-memory font file (TTF/OTF/TTC).
    Bytes(Arc<Vec<u8>>),
    /// Font file on disk, read on first use.
    File(PathBuf),
    /// Bold sans-serif face from the system font database.
    System,
}

impl FontSource {
    /// [`FontSource::File`] from [`FONT_ENV_VAR`] when set and non-empty, else [`FontSource::System`].
    pub fn from_env() -> Self {
        match std::env::var_os(FONT_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::System,
        }
    }
}

struct LoadedFont {
    font: vello_cpu::peniko::FontData,
    family: String,
}

/// Text backend shaping with Parley and drawing glyph outlines through `vello_cpu`.
///
/// The font is loaded lazily on the first [`TextBackend::ready`] or measurement. A source that
/// cannot be read or holds no usable face turns into
/// [`CardError::MeasurementUnavailable`]. Each instance owns its Parley contexts, so batch
/// workers build one backend each.
pub struct FontText {
    source: FontSource,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    loaded: Option<LoadedFont>,
}

impl std::fmt::Debug for FontText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontText")
            .field("source", &self.source)
            .field("family", &self.family())
            .finish_non_exhaustive()
    }
}

impl FontText {
    /// Backend for `source`. Nothing is read until first use.
    pub fn new(source: FontSource) -> Self {
        Self {
            source,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            loaded: None,
        }
    }

    /// Backend over in-memory font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(FontSource::Bytes(Arc::new(bytes)))
    }

    /// Backend using the system font database.
    pub fn system() -> Self {
        Self::new(FontSource::System)
    }

    /// Family name of the loaded font, once loaded.
    pub fn family(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.family.as_str())
    }

    fn load(&mut self) -> CardResult<&LoadedFont> {
        if self.loaded.is_none() {
            let (bytes, index) = read_font_source(&self.source)?;

            let families = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                CardError::measurement_unavailable("no font families registered from font bytes")
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| {
                    CardError::measurement_unavailable("registered font family has no name")
                })?
                .to_string();

            tracing::debug!(family = %family, face_index = index, "loaded card font");
            self.loaded = Some(LoadedFont {
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes),
                    index,
                ),
                family,
            });
        }

        self.loaded
            .as_ref()
            .ok_or_else(|| CardError::measurement_unavailable("font failed to load"))
    }

    fn layout_line(&mut self, text: &str, size_px: f32) -> CardResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::invalid_spec("text size_px must be finite and > 0"));
        }
        let family = self.load()?.family.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn read_font_source(source: &FontSource) -> CardResult<(Vec<u8>, u32)> {
    match source {
        FontSource::Bytes(bytes) => Ok((bytes.as_ref().clone(), 0)),
        FontSource::File(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                CardError::measurement_unavailable(format!(
                    "read font file {}: {e}",
                    path.display()
                ))
            })?;
            Ok((bytes, 0))
        }
        FontSource::System => system_font_bytes(),
    }
}

fn system_font_bytes() -> CardResult<(Vec<u8>, u32)> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::BOLD,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| CardError::measurement_unavailable("no system fonts installed"))?;

    db.with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| CardError::measurement_unavailable("system font data is not readable"))
}

impl TextMeasure for FontText {
    fn measure(&mut self, text: &str, size_px: f32) -> CardResult<f64> {
        if text.is_empty() {
            self.load()?;
            return Ok(0.0);
        }
        let layout = self.layout_line(text, size_px)?;
        Ok(f64::from(layout.width()))
    }
}

impl TextBackend for FontText {
    fn ready(&mut self) -> CardResult<()> {
        self.load().map(|_| ())
    }

    fn fill_text(
        &mut self,
        surface: &mut Surface,
        text: &str,
        baseline_origin: Point,
        size_px: f32,
        color: Rgba8,
    ) -> CardResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.layout_line(text, size_px)?;
        let font = self.load()?.font.clone();

        let Some(first_line) = layout.lines().next() else {
            return Ok(());
        };
        // Parley positions glyphs from the top of the layout box.
        let origin = Point::new(
            baseline_origin.x,
            baseline_origin.y - f64::from(first_line.metrics().baseline),
        );

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                surface.fill_glyphs(&font, run.run().font_size(), origin, color, glyphs);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
