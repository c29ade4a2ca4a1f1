use super::*;
use crate::foundation::core::Canvas;

fn pixel(frame: &crate::render::surface::FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn measure_counts_chars_not_bytes() {
    let mut t = FixedAdvanceText::new();
    assert_eq!(t.measure("", 42.0).unwrap(), 0.0);
    let ascii = t.measure("abcd", 20.0).unwrap();
    assert!((ascii - 4.0 * 20.0 * DEFAULT_ADVANCE_EM).abs() < 1e-9);
    let wide = t.measure("\u{00e9}\u{00e9}\u{00e9}\u{00e9}", 20.0).unwrap();
    assert_eq!(ascii, wide);
}

#[test]
fn custom_advance_must_be_positive() {
    assert!(FixedAdvanceText::with_advance_em(0.0).is_err());
    assert!(FixedAdvanceText::with_advance_em(f64::NAN).is_err());
    let t = FixedAdvanceText::with_advance_em(1.0).unwrap();
    assert_eq!(t.advance_em(), 1.0);
}

#[test]
fn fill_text_draws_boxes_and_skips_whitespace() {
    let mut surface = Surface::new(Canvas {
        width: 40,
        height: 20,
    })
    .unwrap();
    let before = surface.state();

    let mut t = FixedAdvanceText::new();
    t.ready().unwrap();
    t.fill_text(
        &mut surface,
        "a b",
        Point::new(0.0, 10.0),
        10.0,
        Rgba8::rgb(255, 0, 0),
    )
    .unwrap();
    assert_eq!(surface.state(), before);
    assert_eq!(surface.saved_depth(), 0);

    let frame = surface.finish();
    assert_eq!(pixel(&frame, 2, 6), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 7, 6), [0, 0, 0, 0]);
    assert_eq!(pixel(&frame, 13, 6), [255, 0, 0, 255]);
    // Nothing above the box top or below the baseline.
    assert_eq!(pixel(&frame, 2, 1), [0, 0, 0, 0]);
    assert_eq!(pixel(&frame, 2, 12), [0, 0, 0, 0]);
}
