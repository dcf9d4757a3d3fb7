use rayon::prelude::*;
use tracing::debug;

use crate::core::{ScaleDivision, ScaleEngine};

/// One axis to divide in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRequest {
    pub x1: f64,
    pub x2: f64,
    pub max_major_steps: u32,
    pub max_minor_steps: u32,
    /// `0.0` lets the engine pick the step.
    pub step_size: f64,
}

impl AxisRequest {
    #[must_use]
    pub const fn new(x1: f64, x2: f64, max_major_steps: u32, max_minor_steps: u32) -> Self {
        Self {
            x1,
            x2,
            max_major_steps,
            max_minor_steps,
            step_size: 0.0,
        }
    }

    #[must_use]
    pub const fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }
}

/// Divides many axes with one shared engine on the rayon pool.
///
/// Results keep the order of `requests`.
#[must_use]
pub fn divide_scales_parallel<E>(engine: &E, requests: &[AxisRequest]) -> Vec<ScaleDivision>
where
    E: ScaleEngine + Sync,
{
    debug!(axes = requests.len(), "dividing scales in parallel");
    requests
        .par_iter()
        .map(|request| {
            engine.divide_scale(
                request.x1,
                request.x2,
                request.max_major_steps,
                request.max_minor_steps,
                request.step_size,
            )
        })
        .collect()
}
