use std::sync::Arc;

use anyhow::Context;

use crate::{
    card::spec::IconSelector,
    foundation::{
        core::Rgba8,
        error::{CardError, CardResult},
    },
    render::surface::FrameRGBA,
};

/// Side of the square view box every preview is authored in.
pub const ICON_VIEW_BOX: u32 = 24;

/// Standalone SVG preview of `icon`, `size` pixels square, drawn in `color`.
///
/// These are the small picker previews, authored on a 24x24 grid. They are similar to, but
/// not the same geometry as, the badges drawn on cards.
pub fn icon_svg(icon: &IconSelector, size: u32, color: Rgba8) -> String {
    let stroke = paint_attrs("stroke", color);
    let fill = paint_attrs("fill", color);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {ICON_VIEW_BOX} {ICON_VIEW_BOX}" fill="none">"#
    );
    match icon {
        IconSelector::None => {}
        IconSelector::Warning => {
            svg.push_str(&format!(
                r#"<path d="M12 2L2 20h20L12 2z" {stroke} stroke-width="2" fill="none"/><line x1="12" y1="9" x2="12" y2="13" {stroke} stroke-width="2"/><circle cx="12" cy="17" r="1" {fill}/>"#
            ));
        }
        IconSelector::Thinking => {
            svg.push_str(&format!("<g {fill}>"));
            for (cx, cy, r) in [
                ("8", "10", "3"),
                ("12", "8", "3.5"),
                ("16", "10", "3"),
                ("14", "13", "3"),
                ("10", "13", "3"),
                ("6", "19", "1.5"),
                ("4", "22", "1"),
            ] {
                svg.push_str(&format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}"/>"#));
            }
            svg.push_str("</g>");
        }
        IconSelector::Blocked => {
            svg.push_str(&format!(
                r#"<circle cx="12" cy="12" r="10" {stroke} stroke-width="2"/><line x1="4.93" y1="4.93" x2="19.07" y2="19.07" {stroke} stroke-width="2"/>"#
            ));
        }
        IconSelector::Emoji(glyph) => {
            svg.push_str(&format!(
                r#"<text x="12" y="19" font-size="18" font-family="sans-serif" text-anchor="middle" {fill}>{}</text>"#,
                escape_xml(glyph)
            ));
        }
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterize preview markup into a `size` x `size` premultiplied frame.
pub fn rasterize_icon_svg(svg: &str, size: u32) -> CardResult<FrameRGBA> {
    if size == 0 {
        return Err(CardError::invalid_spec("icon preview size must be > 0"));
    }

    let mut db = usvg::fontdb::Database::new();
    if svg.contains("<text") {
        db.load_system_fonts();
    }
    let opts = usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse icon svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| CardError::invalid_spec("failed to allocate icon pixmap"))?;
    let sx = size as f32 / tree.size().width();
    let sy = size as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width: size,
        height: size,
        data: pixmap.data().to_vec(),
        premultiplied: true,
    })
}

fn paint_attrs(attr: &str, color: Rgba8) -> String {
    let hex = Rgba8 { a: 255, ..color }.to_hex();
    if color.a == 255 {
        format!(r#"{attr}="{hex}""#)
    } else {
        let opacity = f64::from(color.a) / 255.0;
        format!(r#"{attr}="{hex}" {attr}-opacity="{opacity:.3}""#)
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/icon_svg.rs"]
mod tests;
