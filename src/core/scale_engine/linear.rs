use std::cmp::Ordering;

use tracing::{trace, warn};

use crate::core::math::{
    ceil_eps, divide_interval, floor_eps, fuzzy_compare, is_near_zero, relative_eq,
};
use crate::core::{Interval, ScaleDivision, TickType, Transform};

use super::{
    MAX_MAJOR_TICKS, MAX_MINOR_STEPS, ScaleAttributes, ScaleEngine, ScaleEngineSettings,
};

/// Engine for axes with uniform spacing in scale units.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScaleEngine {
    settings: ScaleEngineSettings,
}

impl Default for LinearScaleEngine {
    fn default() -> Self {
        Self::new(10)
    }
}

impl LinearScaleEngine {
    #[must_use]
    pub fn new(base: u32) -> Self {
        Self {
            settings: ScaleEngineSettings::new(base, Transform::Identity),
        }
    }

    /// Engine that copies attributes, margins, reference and base from
    /// `settings` but keeps an identity transform.
    #[must_use]
    pub(crate) fn from_settings(settings: &ScaleEngineSettings) -> Self {
        Self {
            settings: ScaleEngineSettings {
                transform: Transform::Identity,
                ..*settings
            },
        }
    }

    /// Pushes the lower bound down and the upper bound up to multiples of
    /// `step_size`.
    ///
    /// Bounds that already sit on a multiple, up to float noise, are kept as
    /// they are.
    #[must_use]
    pub fn align(&self, interval: Interval, step_size: f64) -> Interval {
        let mut x1 = interval.min_value();
        let mut x2 = interval.max_value();

        if -f64::MAX + step_size <= x1 {
            let x = floor_eps(x1, step_size);
            if is_near_zero(x) || !relative_eq(x1, x) {
                x1 = x;
            }
        }

        if f64::MAX - step_size >= x2 {
            let x = ceil_eps(x2, step_size);
            if is_near_zero(x) || !relative_eq(x2, x) {
                x2 = x;
            }
        }

        Interval::new(x1, x2)
    }

    fn build_ticks(
        &self,
        interval: Interval,
        step_size: f64,
        max_minor_steps: u32,
    ) -> [Vec<f64>; 3] {
        let bounding_interval = self.align(interval, step_size);

        let major_ticks = build_major_ticks(bounding_interval, step_size);
        let (minor_ticks, medium_ticks) = if max_minor_steps > 0 {
            self.build_minor_ticks(&major_ticks, max_minor_steps, step_size)
        } else {
            (Vec::new(), Vec::new())
        };

        [minor_ticks, medium_ticks, major_ticks].map(|ticks| {
            let mut ticks = self.strip(&ticks, interval);
            for tick in &mut ticks {
                if fuzzy_compare(*tick, 0.0, step_size) == Ordering::Equal {
                    *tick = 0.0;
                }
            }
            ticks
        })
    }

    fn build_minor_ticks(
        &self,
        major_ticks: &[f64],
        max_minor_steps: u32,
        step_size: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let min_step = minor_step_size(
            step_size,
            max_minor_steps.min(MAX_MINOR_STEPS),
            self.base(),
        );
        if min_step == 0.0 {
            return (Vec::new(), Vec::new());
        }

        // ticks per major interval
        let num_ticks = ((step_size / min_step).abs().ceil() as usize).saturating_sub(1);
        let medium_index = (num_ticks % 2 == 1).then_some(num_ticks / 2);

        let mut minor_ticks = Vec::new();
        let mut medium_ticks = Vec::new();

        for major in major_ticks.iter().copied() {
            let mut value = major;
            for k in 0..num_ticks {
                value += min_step;

                let aligned = if fuzzy_compare(value, 0.0, step_size) == Ordering::Equal {
                    0.0
                } else {
                    value
                };

                if Some(k) == medium_index {
                    medium_ticks.push(aligned);
                } else {
                    minor_ticks.push(aligned);
                }
            }
        }

        (minor_ticks, medium_ticks)
    }
}

impl ScaleEngine for LinearScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ScaleEngineSettings {
        &mut self.settings
    }

    fn auto_scale(&self, max_num_steps: u32, x1: f64, x2: f64, _step_size: f64) -> (f64, f64, f64) {
        let mut interval = Interval::new(x1, x2).normalized();

        interval.set_min_value(interval.min_value() - self.lower_margin());
        interval.set_max_value(interval.max_value() + self.upper_margin());

        if self.test_attribute(ScaleAttributes::SYMMETRIC) {
            interval = interval.symmetrize(self.reference());
        }

        if self.test_attribute(ScaleAttributes::INCLUDE_REFERENCE) {
            interval = interval.extend(self.reference());
        }

        if interval.width() == 0.0 {
            interval = self.build_interval(interval.min_value());
        }

        let mut step_size = divide_interval(interval.width(), max_num_steps.max(1), self.base());

        if !self.test_attribute(ScaleAttributes::FLOATING) && step_size != 0.0 {
            interval = self.align(interval, step_size);
        }

        let (mut x1, mut x2) = (interval.min_value(), interval.max_value());

        if self.test_attribute(ScaleAttributes::INVERTED) {
            std::mem::swap(&mut x1, &mut x2);
            step_size = -step_size;
        }

        trace!(x1, x2, step_size, "linear auto scale");
        (x1, x2, step_size)
    }

    fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: u32,
        max_minor_steps: u32,
        step_size: f64,
    ) -> ScaleDivision {
        let interval = Interval::new(x1, x2).normalized();

        if !(interval.max_value() - interval.min_value()).is_finite() {
            warn!(x1, x2, "linear scale width overflows, returning an empty division");
            return ScaleDivision::default();
        }

        if interval.width() <= 0.0 {
            trace!(x1, x2, "empty linear scale interval");
            return ScaleDivision::default();
        }

        let mut step_size = step_size.abs();
        if step_size == 0.0 {
            step_size = divide_interval(interval.width(), max_major_steps.max(1), self.base());
        }

        let mut division = ScaleDivision::default();
        if step_size != 0.0 {
            let ticks = self.build_ticks(interval, step_size, max_minor_steps);
            division = ScaleDivision::from_interval(interval, ticks);
        }

        if x1 > x2 {
            division.invert();
        }

        trace!(
            x1,
            x2,
            step_size,
            major = division.ticks(TickType::Major).len(),
            "linear divide scale"
        );
        division
    }
}

fn build_major_ticks(interval: Interval, step_size: f64) -> Vec<f64> {
    let num_ticks = ((interval.width() / step_size).round() as usize)
        .saturating_add(1)
        .min(MAX_MAJOR_TICKS);

    let mut ticks = Vec::with_capacity(num_ticks);
    ticks.push(interval.min_value());
    for i in 1..num_ticks.saturating_sub(1) {
        ticks.push(interval.min_value() + i as f64 * step_size);
    }
    ticks.push(interval.max_value());
    ticks
}

// Minor step for one major step, falling back to half the major step when
// the nice step does not split it evenly.
fn minor_step_size(interval_size: f64, max_steps: u32, base: u32) -> f64 {
    let min_step = divide_interval(interval_size, max_steps, base);
    if min_step != 0.0 {
        let num_ticks = (interval_size / min_step).abs().ceil() - 1.0;
        if fuzzy_compare(
            (num_ticks + 1.0) * min_step.abs(),
            interval_size.abs(),
            interval_size,
        ) == Ordering::Greater
        {
            return 0.5 * interval_size;
        }
    }
    min_step
}
