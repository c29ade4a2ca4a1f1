use crate::foundation::core::Rgba8;

/// Per-channel amount added to the base color for the first gradient stop.
pub const BRIGHTEN_DELTA: u8 = 40;
/// Per-channel amount subtracted from the base color for the second gradient stop.
pub const DARKEN_DELTA: u8 = 20;
/// Direction of derived gradients (CSS convention, toward the bottom-right corner).
pub const GRADIENT_ANGLE_DEG: f64 = 135.0;

/// Colors derived from a single base color in custom style mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DerivedPalette {
    /// The color the palette was derived from.
    pub base: Rgba8,
    /// First gradient stop: base brightened by [`BRIGHTEN_DELTA`].
    pub gradient_start: Rgba8,
    /// Second gradient stop: base darkened by [`DARKEN_DELTA`].
    pub gradient_end: Rgba8,
    /// Channel inversion of the base. Derived but not drawn on cards.
    pub complementary: Rgba8,
}

/// Add `delta` to every RGB channel, saturating at 255.
pub fn brighten(color: Rgba8, delta: u8) -> Rgba8 {
    color.map_rgb(|c| c.saturating_add(delta))
}

/// Subtract `delta` from every RGB channel, saturating at 0.
pub fn darken(color: Rgba8, delta: u8) -> Rgba8 {
    color.map_rgb(|c| c.saturating_sub(delta))
}

/// Bitwise inversion of the RGB channels (`rgb ^ 0xFFFFFF`).
pub fn complementary(color: Rgba8) -> Rgba8 {
    color.map_rgb(|c| c ^ 0xFF)
}

/// Gradient stops and complementary color derived from `base`.
pub fn derive_palette(base: Rgba8) -> DerivedPalette {
    DerivedPalette {
        base,
        gradient_start: brighten(base, BRIGHTEN_DELTA),
        gradient_end: darken(base, DARKEN_DELTA),
        complementary: complementary(base),
    }
}

/// Straight-alpha RGBA8 pixels of a linear gradient covering a `width` x `height` image.
///
/// The gradient line follows CSS `linear-gradient(<angle>deg, ...)`: it passes through the
/// image center and is long enough that both stops land exactly on opposite corners.
pub fn linear_gradient_rgba8(
    width: u32,
    height: u32,
    start: Rgba8,
    end: Rgba8,
    angle_deg: f64,
) -> Vec<u8> {
    let mut bytes = vec![0u8; (width as usize).saturating_mul(height as usize).saturating_mul(4)];
    let theta = angle_deg.to_radians();
    let (dx, dy) = (theta.sin(), -theta.cos());
    let (w, h) = (f64::from(width), f64::from(height));
    let len = (w * dx).abs() + (h * dy).abs();
    let (cx, cy) = (w / 2.0, h / 2.0);

    let lerp = |a: u8, b: u8, t: f64| -> u8 {
        let af = f64::from(a);
        let bf = f64::from(b);
        (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
    };

    for y in 0..height {
        for x in 0..width {
            let px = f64::from(x) + 0.5 - cx;
            let py = f64::from(y) + 0.5 - cy;
            let t = if len <= f64::EPSILON {
                0.0
            } else {
                ((px * dx + py * dy) / len + 0.5).clamp(0.0, 1.0)
            };
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            bytes[idx] = lerp(start.r, end.r, t);
            bytes[idx + 1] = lerp(start.g, end.g, t);
            bytes[idx + 2] = lerp(start.b, end.b, t);
            bytes[idx + 3] = lerp(start.a, end.a, t);
        }
    }
    bytes
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
