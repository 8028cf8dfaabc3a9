use rayon::prelude::*;

use crate::eval::evaluator::{FrameEvaluator, FrameState};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{FramelineError, FramelineResult};

/// Range evaluation options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOpts {
    /// Evaluate chunks on a rayon pool.
    pub parallel: bool,
    /// Pool size; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Frames per parallel chunk.
    pub chunk_size: usize,
}

impl Default for EvalOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// Evaluate every frame of `range`, in frame order.
///
/// Sequential and parallel runs return identical output. The range must be non-empty and
/// inside the composition.
#[tracing::instrument(skip(evaluator, opts), fields(start = range.start.0, end = range.end.0))]
pub fn evaluate_range(
    evaluator: &FrameEvaluator<'_>,
    range: FrameRange,
    opts: &EvalOpts,
) -> FramelineResult<Vec<FrameState>> {
    if range.is_empty() {
        return Err(FramelineError::validation("evaluation range must be non-empty"));
    }
    let duration = evaluator.composition().duration_in_frames;
    if range.end.0 > duration {
        return Err(FramelineError::validation(format!(
            "evaluation range end {} exceeds composition duration {duration}",
            range.end.0
        )));
    }

    let len = range.len_frames();
    let mut out = Vec::with_capacity(len.min(4096) as usize);

    if !opts.parallel {
        out.extend((range.start.0..range.end.0).map(|f| evaluator.evaluate(f)));
        return Ok(out);
    }

    let pool = build_thread_pool(opts.threads)?;
    let chunk_size = normalized_chunk_size(opts.chunk_size);
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| FramelineError::evaluation(format!("invalid chunk range: {e}")))?;
        let mut frames: Vec<FrameState> = pool.install(|| {
            (chunk.start.0..chunk.end.0)
                .into_par_iter()
                .map(|f| evaluator.evaluate(f))
                .collect()
        });
        out.append(&mut frames);
        chunk_start = chunk_end;
    }
    tracing::debug!(frames = out.len(), "evaluated range in parallel");

    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> FramelineResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramelineError::validation(
            "evaluation 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramelineError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/export.rs"]
mod tests;
