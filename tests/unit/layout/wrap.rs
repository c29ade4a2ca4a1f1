use super::*;

/// Every char is `px` wide regardless of size.
struct CharWidth(f64);

impl TextMeasure for CharWidth {
    fn measure(&mut self, text: &str, _size_px: f32) -> CardResult<f64> {
        Ok(text.chars().count() as f64 * self.0)
    }
}

struct Unavailable;

impl TextMeasure for Unavailable {
    fn measure(&mut self, _text: &str, _size_px: f32) -> CardResult<f64> {
        Err(CardError::measurement_unavailable("no font"))
    }
}

fn params(max_width: f64) -> WrapParams {
    WrapParams {
        origin: Point::new(50.0, 100.0),
        max_width,
        line_height: 55.0,
        font_size_px: 42.0,
    }
}

fn texts(lines: &[LaidLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn greedy_wrap_breaks_at_word_boundaries() {
    let lines = wrap_text("the quick brown fox jumps", &params(100.0), &mut CharWidth(10.0)).unwrap();
    assert_eq!(texts(&lines), ["the quick", "brown fox", "jumps"]);
    assert_eq!(lines[0].baseline_y, 100.0);
    assert_eq!(lines[1].baseline_y, 155.0);
    assert_eq!(lines[2].baseline_y, 210.0);
    assert!(lines.iter().all(|l| l.x == 50.0));
    assert_eq!(lines[0].width, 90.0);
}

#[test]
fn exact_fit_stays_on_the_line() {
    let lines = wrap_text("abcd efghi", &params(100.0), &mut CharWidth(10.0)).unwrap();
    assert_eq!(texts(&lines), ["abcd efghi"]);
}

#[test]
fn over_wide_word_sits_alone() {
    let lines = wrap_text(
        "a supercalifragilistic b",
        &params(50.0),
        &mut CharWidth(10.0),
    )
    .unwrap();
    assert_eq!(texts(&lines), ["a", "supercalifragilistic", "b"]);
    assert_eq!(lines[1].width, 200.0);
}

#[test]
fn text_without_whitespace_is_one_line() {
    let lines = wrap_text(&"x".repeat(500), &params(10.0), &mut CharWidth(10.0)).unwrap();
    assert_eq!(lines.len(), 1);
}

#[test]
fn empty_and_blank_input_give_no_lines() {
    let mut m = CharWidth(10.0);
    assert!(wrap_text("", &params(100.0), &mut m).unwrap().is_empty());
    assert!(wrap_text(" \t \n ", &params(100.0), &mut m).unwrap().is_empty());
}

#[test]
fn whitespace_runs_collapse_to_single_spaces() {
    let lines = wrap_text("  what   went\twell ", &params(1000.0), &mut CharWidth(10.0)).unwrap();
    assert_eq!(texts(&lines), ["what went well"]);
}

#[test]
fn lines_fit_unless_single_overwide_word() {
    let prompt = "If this sprint were a movie what would the sequel be called and who \
                  would refuse to star in it because of the retro notes";
    for max in [40.0, 90.0, 130.0, 250.0, 600.0] {
        let mut m = CharWidth(7.0);
        let lines = wrap_text(prompt, &params(max), &mut m).unwrap();
        for line in &lines {
            let single_word = !line.text.contains(' ');
            assert!(line.width <= max || single_word, "{max}: {line:?}");
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split(' ')).collect();
        let original: Vec<&str> = prompt.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }
}

#[test]
fn measurement_failure_propagates() {
    let err = wrap_text("hello", &params(100.0), &mut Unavailable).unwrap_err();
    assert!(matches!(err, CardError::MeasurementUnavailable(_)));
    // Nothing to measure, nothing to fail.
    assert!(wrap_text("", &params(100.0), &mut Unavailable).unwrap().is_empty());
}

#[test]
fn rejects_non_finite_params() {
    let mut m = CharWidth(1.0);
    assert!(wrap_text("a", &params(f64::NAN), &mut m).is_err());
    let mut p = params(10.0);
    p.line_height = f64::INFINITY;
    assert!(wrap_text("a", &p, &mut m).is_err());
}
