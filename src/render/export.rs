use std::io::Cursor;

use crate::{
    foundation::{
        error::{CardError, CardResult},
        math::scale_by_coverage,
    },
    render::surface::FrameRGBA,
};

/// Multiply `frame` by the coverage of a `radius`-cornered rectangle spanning the whole frame.
///
/// Pixels fully outside the rounded rectangle become transparent; edge pixels are scaled by
/// their analytic coverage sampled at the pixel center. Expects premultiplied data.
pub fn apply_rounded_mask(frame: &mut FrameRGBA, radius: f64) {
    let (w, h) = (f64::from(frame.width), f64::from(frame.height));
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    if r <= 0.0 {
        return;
    }
    let (hw, hh) = (w / 2.0, h / 2.0);
    let width = frame.width as usize;

    for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
        let x = (i % width) as f64 + 0.5;
        let y = (i / width) as f64 + 0.5;

        let qx = (x - hw).abs() - (hw - r);
        let qy = (y - hh).abs() - (hh - r);
        // Only the corner squares can lose coverage.
        if qx <= 0.0 || qy <= 0.0 {
            continue;
        }
        let dist = (qx * qx + qy * qy).sqrt() - r;
        let coverage = (0.5 - dist).clamp(0.0, 1.0);
        if coverage >= 1.0 {
            continue;
        }

        let m = (coverage * 255.0).round() as u8;
        for c in px.iter_mut() {
            *c = scale_by_coverage(*c, m);
        }
    }
}

/// Straight-alpha copy of premultiplied RGBA8 bytes.
pub fn unpremultiply_rgba8(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let unpremul = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
        out.extend_from_slice(&[unpremul(px[0]), unpremul(px[1]), unpremul(px[2]), px[3]]);
    }
    out
}

/// Encode a frame as a straight-alpha RGBA8 PNG.
pub fn encode_png(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(CardError::export(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let straight = if frame.premultiplied {
        unpremultiply_rgba8(&frame.data)
    } else {
        frame.data.clone()
    };
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| CardError::export("frame buffer is too small for its size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CardError::export(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
