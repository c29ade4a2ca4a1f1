use super::*;

#[test]
fn missing_font_file_is_measurement_unavailable() {
    let mut t = FontText::new(FontSource::File(PathBuf::from(
        "target/definitely-missing-font.ttf",
    )));
    let err = t.ready().unwrap_err();
    assert!(matches!(err, CardError::MeasurementUnavailable(_)), "{err:?}");
    assert!(t.family().is_none());

    let err = t.measure("hello", 42.0).unwrap_err();
    assert!(matches!(err, CardError::MeasurementUnavailable(_)), "{err:?}");
}

#[test]
fn garbage_font_bytes_are_measurement_unavailable() {
    let mut t = FontText::from_bytes(b"not a font at all".to_vec());
    let err = t.ready().unwrap_err();
    assert!(matches!(err, CardError::MeasurementUnavailable(_)), "{err:?}");
}

#[test]
fn system_font_measures_monotonically_when_available() {
    let mut t = FontText::system();
    if t.ready().is_err() {
        eprintln!("skipping: no system fonts installed");
        return;
    }
    assert!(t.family().is_some());

    let short = t.measure("retro", 42.0).unwrap();
    let long = t.measure("retrospective", 42.0).unwrap();
    let small = t.measure("retrospective", 21.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!(small < long);
    assert_eq!(t.measure("", 42.0).unwrap(), 0.0);
}
