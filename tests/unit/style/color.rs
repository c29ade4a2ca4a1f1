use super::*;

#[test]
fn derives_gradient_stops_and_complement_from_indigo() {
    let base = Rgba8::parse_hex("#6366f1").unwrap();
    let p = derive_palette(base);
    assert_eq!(p.base, base);
    assert_eq!(p.gradient_start.to_hex(), "#8b8eff");
    assert_eq!(p.gradient_end.to_hex(), "#4f52dd");
    assert_eq!(p.complementary.to_hex(), "#9c990e");
}

#[test]
fn channel_shifts_saturate_instead_of_wrapping() {
    assert_eq!(brighten(Rgba8::rgb(250, 215, 216), 40), Rgba8::rgb(255, 255, 255));
    assert_eq!(darken(Rgba8::rgb(5, 20, 21), 20), Rgba8::rgb(0, 0, 1));
}

#[test]
fn derivation_keeps_alpha() {
    let p = derive_palette(Rgba8::rgba(10, 20, 30, 77));
    assert_eq!(p.gradient_start.a, 77);
    assert_eq!(p.gradient_end.a, 77);
    assert_eq!(p.complementary.a, 77);
}

#[test]
fn complement_is_an_involution() {
    let c = Rgba8::rgb(0x12, 0x34, 0x56);
    assert_eq!(complementary(complementary(c)), c);
    assert_eq!(complementary(Rgba8::BLACK), Rgba8::WHITE);
}

#[test]
fn gradient_135_runs_from_top_left_to_bottom_right() {
    let (w, h) = (40u32, 20u32);
    let start = Rgba8::rgb(255, 0, 0);
    let end = Rgba8::rgb(0, 0, 255);
    let px = linear_gradient_rgba8(w, h, start, end, GRADIENT_ANGLE_DEG);
    assert_eq!(px.len(), (w * h * 4) as usize);

    let at = |x: u32, y: u32| -> [u8; 4] {
        let i = ((y * w + x) * 4) as usize;
        [px[i], px[i + 1], px[i + 2], px[i + 3]]
    };
    let top_left = at(0, 0);
    let bottom_right = at(w - 1, h - 1);
    assert!(top_left[0] > 240 && top_left[2] < 15);
    assert!(bottom_right[2] > 240 && bottom_right[0] < 15);
    assert_eq!(top_left[3], 255);

    // Same distance along the gradient line gives the same color.
    let mid_a = at(w / 2, h / 2);
    let mid_b = at(w / 2 - 1, h / 2 + 1);
    assert_eq!(mid_a, mid_b);
}

#[test]
fn gradient_90_is_constant_down_each_column() {
    let px = linear_gradient_rgba8(8, 4, Rgba8::BLACK, Rgba8::WHITE, 90.0);
    for x in 0..8usize {
        let first = px[x * 4];
        for y in 1..4usize {
            assert_eq!(px[(y * 8 + x) * 4], first);
        }
    }
    assert!(px[0] < px[7 * 4]);
}
