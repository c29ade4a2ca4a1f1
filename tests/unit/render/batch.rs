use super::*;
use crate::text::fixed::FixedAdvanceText;

fn prompts() -> Vec<String> {
    vec![
        "What should we start doing?".to_string(),
        "What should we stop doing?".to_string(),
        "What should we keep doing?".to_string(),
    ]
}

#[test]
fn sequential_batch_yields_one_card_per_prompt_in_order() {
    let prompts = prompts();
    let spec = CardSpec::default();
    let mut renderer = CardRenderer::new(FixedAdvanceText::new());

    let batch = renderer.render_batch(&prompts, &spec);
    assert_eq!(batch.len(), 3);
    let names: Vec<String> = batch
        .map(|card| card.unwrap().file_name().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "What_shoul-info-card.png",
            "What_shoul-info-card.png",
            "What_shoul-info-card.png"
        ]
    );

    let lines: Vec<String> = renderer
        .render_batch(&prompts, &spec)
        .map(|card| card.unwrap().lines()[0].text.clone())
        .collect();
    assert_eq!(
        lines,
        [
            "What should we start",
            "What should we stop",
            "What should we keep"
        ]
    );
}

#[test]
fn batch_is_lazy_and_restartable() {
    let prompts = prompts();
    let spec = CardSpec::default();
    let mut renderer = CardRenderer::new(FixedAdvanceText::new());

    let first = renderer
        .render_batch(&prompts, &spec)
        .next()
        .unwrap()
        .unwrap();
    let again = renderer
        .render_batch(&prompts, &spec)
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(first.png(), again.png());
}

#[test]
fn parallel_batch_matches_sequential_output() {
    let prompts = prompts();
    let spec = CardSpec::default();

    let mut renderer = CardRenderer::new(FixedAdvanceText::new());
    let sequential: Vec<u64> = renderer
        .render_batch(&prompts, &spec)
        .map(|card| card.unwrap().fingerprint())
        .collect();

    let parallel: Vec<u64> = render_batch_parallel(
        &prompts,
        &spec,
        &BatchThreading { threads: Some(2) },
        FixedAdvanceText::new,
    )
    .unwrap()
    .into_iter()
    .map(|card| card.unwrap().fingerprint())
    .collect();

    assert_eq!(parallel, sequential);
}

#[test]
fn parallel_batch_rejects_bad_setup_up_front() {
    let prompts = prompts();
    let err = render_batch_parallel(
        &prompts,
        &CardSpec::default(),
        &BatchThreading { threads: Some(0) },
        FixedAdvanceText::new,
    )
    .unwrap_err();
    assert!(matches!(err, CardError::InvalidSpec(_)));

    let bad = CardSpec {
        response_area_fraction: 3.0,
        ..CardSpec::default()
    };
    let err = render_batch_parallel(
        &prompts,
        &bad,
        &BatchThreading::default(),
        FixedAdvanceText::new,
    )
    .unwrap_err();
    assert!(matches!(err, CardError::InvalidSpec(_)));
}

#[test]
fn empty_batch_is_empty() {
    let none: [&str; 0] = [];
    let mut renderer = CardRenderer::new(FixedAdvanceText::new());
    assert_eq!(renderer.render_batch(&none, &CardSpec::default()).count(), 0);
    let out = render_batch_parallel(
        &none,
        &CardSpec::default(),
        &BatchThreading::default(),
        FixedAdvanceText::new,
    )
    .unwrap();
    assert!(out.is_empty());
}
