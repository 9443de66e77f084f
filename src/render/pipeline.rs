use rayon::prelude::*;

use crate::countdown::sequence::{FramePlan, FrameSpec};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::cpu::FrameRenderer;
use crate::render::frame::FrameRGBA;
use crate::render::style::CountdownStyle;
use crate::render::text::FontSource;

/// Render every frame of `plan`, one independent job per frame.
///
/// Jobs run on `pool` and each worker owns its own [`FrameRenderer`]. The
/// output is collected positionally, so `out[i]` is always the frame for
/// `plan.frames()[i]` whatever order the jobs finish in. The first error wins;
/// sibling jobs already running are not interrupted and their output is dropped.
#[tracing::instrument(skip_all, fields(frames = plan.len()))]
pub fn render_frames(
    plan: &FramePlan,
    style: &CountdownStyle,
    font: &FontSource,
    pool: &rayon::ThreadPool,
) -> CountdownResult<Vec<FrameRGBA>> {
    if plan.is_empty() {
        return Err(CountdownError::validation("frame plan must be non-empty"));
    }
    style.validate()?;

    run_frame_jobs(
        plan,
        pool,
        || FrameRenderer::new(style, font),
        |renderer: &mut FrameRenderer, spec: &FrameSpec| renderer.render(spec.remaining_secs),
    )
}

/// Fan `job` out over the frames of `plan`, one worker state per rayon thread.
///
/// A failed `init` fails every job that lands on that worker. Results keep
/// plan order; if any job fails, one of the errors is returned and no
/// partial output escapes.
pub(crate) fn run_frame_jobs<W, T, I, J>(
    plan: &FramePlan,
    pool: &rayon::ThreadPool,
    init: I,
    job: J,
) -> CountdownResult<Vec<T>>
where
    T: Send,
    I: Fn() -> CountdownResult<W> + Sync + Send,
    J: Fn(&mut W, &FrameSpec) -> CountdownResult<T> + Sync + Send,
{
    pool.install(|| {
        plan.frames()
            .par_iter()
            .map_init(&init, |worker, spec| -> CountdownResult<T> {
                let state = worker.as_mut().map_err(|e| {
                    CountdownError::render(format!("frame worker init failed: {e}"))
                })?;
                job(state, spec).map_err(|e| {
                    tracing::debug!(index = spec.index.0, error = %e, "frame job failed");
                    e
                })
            })
            .collect::<CountdownResult<Vec<_>>>()
    })
}

/// Build the worker pool shared by frame rendering and palette quantization.
pub fn build_thread_pool(threads: Option<usize>) -> CountdownResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CountdownError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder =
        rayon::ThreadPoolBuilder::new().thread_name(|i| format!("countdown-render-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        CountdownError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
