use rayon::prelude::*;

use crate::{
    card::spec::CardSpec,
    foundation::error::{CardError, CardResult},
    render::compositor::{CardRenderer, RenderedCard, render_card},
    text::backend::TextBackend,
};

/// Sequential card iterator returned by [`CardRenderer::render_batch`].
pub struct CardBatch<'a, T, S> {
    renderer: &'a mut CardRenderer<T>,
    prompts: std::slice::Iter<'a, S>,
    spec: &'a CardSpec,
}

impl<'a, T: TextBackend, S: AsRef<str>> CardBatch<'a, T, S> {
    pub(crate) fn new(
        renderer: &'a mut CardRenderer<T>,
        prompts: &'a [S],
        spec: &'a CardSpec,
    ) -> Self {
        Self {
            renderer,
            prompts: prompts.iter(),
            spec,
        }
    }
}

impl<T: TextBackend, S: AsRef<str>> Iterator for CardBatch<'_, T, S> {
    type Item = CardResult<RenderedCard>;

    fn next(&mut self) -> Option<Self::Item> {
        let prompt = self.prompts.next()?;
        Some(self.renderer.render(prompt.as_ref(), self.spec))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.prompts.size_hint()
    }
}

impl<T: TextBackend, S: AsRef<str>> ExactSizeIterator for CardBatch<'_, T, S> {}

/// Thread pool settings for [`render_batch_parallel`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchThreading {
    /// Worker count. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Render every prompt on a dedicated rayon pool.
///
/// Each worker builds its own text backend with `make_backend`. Results come back in input
/// order with one entry per prompt; the outer error covers only problems that would fail
/// every card (invalid spec, pool construction).
#[tracing::instrument(level = "debug", skip_all, fields(cards = prompts.len(), threads = ?threading.threads))]
pub fn render_batch_parallel<T, F, S>(
    prompts: &[S],
    spec: &CardSpec,
    threading: &BatchThreading,
    make_backend: F,
) -> CardResult<Vec<CardResult<RenderedCard>>>
where
    T: TextBackend,
    F: Fn() -> T + Sync + Send,
    S: AsRef<str> + Sync,
{
    spec.validate()?;
    let pool = build_thread_pool(threading.threads)?;

    Ok(pool.install(|| {
        prompts
            .par_iter()
            .map_init(&make_backend, |backend, prompt| {
                render_card(backend, prompt.as_ref(), spec)
            })
            .collect::<Vec<_>>()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> CardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardError::invalid_spec(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
