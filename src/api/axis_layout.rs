use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Interval, Point, ScaleDivision, ScaleEngine, ScaleMap, TickType};
use crate::error::{ScaleError, ScaleResult};

use super::scale_draw::{LabelMetrics, ScaleDraw};

/// Knobs for [`resolve_axis_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLayoutOptions {
    pub max_major_steps: u32,
    pub max_minor_steps: u32,
    /// Upper bound on relayout passes.
    pub max_passes: u8,
    /// Widen the data range to nice bounds before dividing it.
    pub auto_scale: bool,
}

impl Default for AxisLayoutOptions {
    fn default() -> Self {
        Self {
            max_major_steps: 8,
            max_minor_steps: 5,
            max_passes: 4,
            auto_scale: true,
        }
    }
}

/// Border distances closer than this count as unchanged between passes.
const BORDER_TOLERANCE_PX: f64 = 0.5;

/// Record of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLayoutPass {
    pub max_major_steps: u32,
    pub major_tick_count: usize,
    pub backbone_length: f64,
    /// Label overhang `(start, end)` measured on this pass.
    pub border_dist: (f64, f64),
    pub min_length: f64,
}

/// Result of fitting an axis into a given length.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub division: ScaleDivision,
    pub map: ScaleMap,
    /// Space the axis takes perpendicular to its backbone.
    pub extent: f64,
    /// Space reserved before and after the backbone for label overhang.
    pub border_dist: (f64, f64),
    pub passes: SmallVec<[AxisLayoutPass; 4]>,
    /// `false` when the pass limit hit before labels fit and borders settled.
    pub converged: bool,
}

/// Fits the axis of `draw` into `length` pixels starting at its current
/// position.
///
/// Every pass shrinks the backbone by the label overhang measured on the
/// previous pass, divides the scale and measures the labels again. When the
/// labels need more room than `length` the next pass gets fewer major steps.
/// The layout converges once the labels fit and the overhang stops changing.
/// The draw keeps the division, map and backbone of the last pass.
pub fn resolve_axis_layout(
    engine: &impl ScaleEngine,
    data_range: Interval,
    length: f64,
    draw: &mut ScaleDraw,
    metrics: &impl LabelMetrics,
    options: AxisLayoutOptions,
) -> ScaleResult<AxisLayout> {
    if !length.is_finite() || length <= 0.0 {
        return Err(ScaleError::InvalidData(
            "axis length must be finite and > 0".to_owned(),
        ));
    }
    if !data_range.min_value().is_finite() || !data_range.max_value().is_finite() {
        return Err(ScaleError::InvalidData(
            "axis data range must be finite".to_owned(),
        ));
    }
    if options.max_passes == 0 {
        return Err(ScaleError::InvalidConfig(
            "axis layout needs at least one pass".to_owned(),
        ));
    }

    let origin = draw.pos();
    let horizontal = draw.alignment().is_horizontal();

    let mut passes = SmallVec::<[AxisLayoutPass; 4]>::new();
    let mut reserved = (0.0, 0.0);
    let mut max_major_steps = options.max_major_steps.max(1);
    let mut converged = false;

    for _ in 0..options.max_passes {
        let backbone_length = length - reserved.0 - reserved.1;
        if backbone_length <= 0.0 {
            debug!(length, ?reserved, "label overhang leaves no room for the backbone");
            break;
        }
        draw.move_to(shifted(origin, reserved.0, horizontal), backbone_length);

        let (x1, x2, step_size) = if options.auto_scale {
            engine.auto_scale(
                max_major_steps,
                data_range.min_value(),
                data_range.max_value(),
                0.0,
            )
        } else {
            (data_range.min_value(), data_range.max_value(), 0.0)
        };

        let division =
            engine.divide_scale(x1, x2, max_major_steps, options.max_minor_steps, step_size);
        draw.set_scale_division(division, engine.transformation());

        let border_dist = draw.border_dist(metrics);
        let min_length = draw.min_length(metrics);
        let major_tick_count = draw.scale_division().ticks(TickType::Major).len();
        passes.push(AxisLayoutPass {
            max_major_steps,
            major_tick_count,
            backbone_length,
            border_dist,
            min_length,
        });
        trace!(
            max_major_steps,
            major_tick_count,
            backbone_length,
            min_length,
            "axis layout pass"
        );

        let fits = min_length <= length;
        let settled = (border_dist.0 - reserved.0).abs() < BORDER_TOLERANCE_PX
            && (border_dist.1 - reserved.1).abs() < BORDER_TOLERANCE_PX;
        if fits && settled {
            converged = true;
            break;
        }

        if !fits {
            let next = fewer_major_steps(max_major_steps, major_tick_count);
            if next == max_major_steps && settled {
                break;
            }
            max_major_steps = next;
        }
        reserved = border_dist;
    }

    if !converged {
        debug!(
            passes = passes.len(),
            length, "axis layout did not converge within the pass limit"
        );
    }

    Ok(AxisLayout {
        division: draw.scale_division().clone(),
        map: *draw.scale_map(),
        extent: draw.extent(metrics),
        border_dist: reserved,
        passes,
        converged,
    })
}

fn shifted(origin: Point, offset: f64, horizontal: bool) -> Point {
    if horizontal {
        Point::new(origin.x + offset, origin.y)
    } else {
        Point::new(origin.x, origin.y + offset)
    }
}

// Halves the step budget relative to what the last pass actually produced.
fn fewer_major_steps(max_major_steps: u32, major_tick_count: usize) -> u32 {
    let produced_steps = u32::try_from(major_tick_count.saturating_sub(1)).unwrap_or(u32::MAX);
    let current = max_major_steps.min(produced_steps.max(1));
    (current / 2).max(1)
}
