//! promptcards renders retrospective prompts onto styled, shareable card images.
//!
//! The core is a deterministic compositor: a prompt plus a [`CardSpec`] goes in, a fixed
//! 700x1000 PNG with word-wrapped text, an icon badge and a caption comes out.
//!
//! - Resolve a [`CardStyle`] and [`CardOptions`] into a [`CardSpec`]
//! - Pick a [`TextBackend`] ([`FontText`] for real fonts, [`FixedAdvanceText`] for
//!   font-free deterministic output)
//! - Render one card with [`CardRenderer::render`], a lazy sequence with
//!   [`CardRenderer::render_batch`], or many at once with [`render_batch_parallel`]
//!
//! Settings persistence and the template library live in a separate shell layer
//! ([`SettingsStore`], [`TemplateLibrary`]) that the compositor never touches.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod card;
mod foundation;
mod layout;
mod render;
mod shell;
mod style;
mod text;

pub use crate::assets::icon_svg::{ICON_VIEW_BOX, icon_svg, rasterize_icon_svg};
pub use crate::card::prompt::{EXPORT_SUFFIX, SLUG_MAX_CHARS, export_file_name, parse_prompts};
pub use crate::card::spec::{
    Background, CARD_CANVAS, CardSpec, DEFAULT_CAPTION, DEFAULT_EMOJI, IconSelector,
};
pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{CardError, CardResult};
pub use crate::layout::geometry::CardLayout;
pub use crate::layout::wrap::{LaidLine, WrapParams, wrap_text};
pub use crate::render::batch::{BatchThreading, CardBatch, render_batch_parallel};
pub use crate::render::compositor::{CardRenderer, RenderedCard, render_card};
pub use crate::render::export::{apply_rounded_mask, encode_png, unpremultiply_rgba8};
pub use crate::render::icon::{IconPrimitive, draw_icon, icon_primitives};
pub use crate::render::surface::{DrawState, FrameRGBA, PaintImage, Surface};
pub use crate::shell::settings::{
    MAX_RESPONSE_PERCENT, SETTINGS_KEY, Settings, load_settings, save_settings,
};
pub use crate::shell::store::{JsonFileStore, MemoryStore, SettingsStore, load_json, save_json};
pub use crate::shell::templates::{TEMPLATES_KEY, Template, TemplateLibrary, builtin_templates};
pub use crate::style::color::{
    BRIGHTEN_DELTA, DARKEN_DELTA, DerivedPalette, GRADIENT_ANGLE_DEG, brighten, complementary,
    darken, derive_palette, linear_gradient_rgba8,
};
pub use crate::style::preset::{CardOptions, CardStyle, DEFAULT_CUSTOM_BACKGROUND};
pub use crate::text::backend::{TextBackend, TextMeasure};
pub use crate::text::fixed::{DEFAULT_ADVANCE_EM, FixedAdvanceText};
pub use crate::text::font::{FONT_ENV_VAR, FontSource, FontText};
