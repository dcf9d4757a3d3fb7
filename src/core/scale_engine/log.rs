use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::core::math::{
    LOG_MAX, LOG_MIN, ceil_eps, floor_eps, fuzzy_compare, log_base, relative_eq,
};
use crate::core::{Interval, ScaleDivision, TickType, Transform};

use super::{
    LinearScaleEngine, MAX_MAJOR_TICKS, MAX_MINOR_STEPS, ScaleAttributes, ScaleEngine,
    ScaleEngineSettings,
};

/// Engine for axes with uniform spacing in powers of the base.
///
/// Bounds are clamped into `[LOG_MIN, LOG_MAX]` before any logarithm is
/// taken. Ranges narrower than one power of the base are divided linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct LogScaleEngine {
    settings: ScaleEngineSettings,
}

impl Default for LogScaleEngine {
    fn default() -> Self {
        Self::new(10)
    }
}

impl LogScaleEngine {
    #[must_use]
    pub fn new(base: u32) -> Self {
        Self {
            settings: ScaleEngineSettings::new(base, Transform::Log),
        }
    }

    /// Aligns both bounds to multiples of `step_size` in log space.
    ///
    /// A bound whose logarithm is within the fuzzy tolerance of the aligned
    /// value is kept unchanged.
    #[must_use]
    pub fn align(&self, interval: Interval, step_size: f64) -> Interval {
        let base = self.log_base_f64();
        let log_interval = to_log_interval(base, interval);

        let mut x1 = floor_eps(log_interval.min_value(), step_size);
        if fuzzy_compare(log_interval.min_value(), x1, step_size) == Ordering::Equal {
            x1 = log_interval.min_value();
        }

        let mut x2 = ceil_eps(log_interval.max_value(), step_size);
        if fuzzy_compare(log_interval.max_value(), x2, step_size) == Ordering::Equal {
            x2 = log_interval.max_value();
        }

        let aligned = Interval::new(base.powf(x1), base.powf(x2));

        // Keep exact input bounds when alignment did not move them in log space.
        let min_value = if x1 == log_interval.min_value() {
            interval.min_value()
        } else {
            aligned.min_value()
        };
        let max_value = if x2 == log_interval.max_value() {
            interval.max_value()
        } else {
            aligned.max_value()
        };
        Interval::new(min_value, max_value)
    }

    fn log_base_f64(&self) -> f64 {
        f64::from(self.base())
    }

    fn linear_engine(&self) -> LinearScaleEngine {
        LinearScaleEngine::from_settings(self.settings())
    }

    fn build_ticks(
        &self,
        interval: Interval,
        step_size: f64,
        max_minor_steps: u32,
    ) -> [Vec<f64>; 3] {
        let bounding_interval = self.align(interval, step_size);

        let major_ticks = self.build_major_ticks(bounding_interval, step_size);
        let (minor_ticks, medium_ticks) = if max_minor_steps > 0 {
            self.build_minor_ticks(&major_ticks, max_minor_steps, step_size)
        } else {
            (Vec::new(), Vec::new())
        };

        [minor_ticks, medium_ticks, major_ticks].map(|ticks| self.strip(&ticks, interval))
    }

    fn build_major_ticks(&self, interval: Interval, step_size: f64) -> Vec<f64> {
        let width = to_log_interval(self.log_base_f64(), interval).width();

        let num_ticks = ((width / step_size).round() as usize)
            .saturating_add(1)
            .min(MAX_MAJOR_TICKS);

        let lx_min = interval.min_value().ln();
        let lx_max = interval.max_value().ln();
        let l_step = (lx_max - lx_min) / (num_ticks.max(2) - 1) as f64;

        let mut ticks = Vec::with_capacity(num_ticks);
        ticks.push(interval.min_value());
        for i in 1..num_ticks.saturating_sub(1) {
            ticks.push((lx_min + i as f64 * l_step).exp());
        }
        ticks.push(interval.max_value());
        ticks
    }

    fn build_minor_ticks(
        &self,
        major_ticks: &[f64],
        max_minor_steps: u32,
        step_size: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let base = self.log_base_f64();
        let max_minor_steps = max_minor_steps.min(MAX_MINOR_STEPS);
        let mut minor_ticks = Vec::new();
        let mut medium_ticks = Vec::new();

        if step_size < 1.1 {
            // one power of the base per major step: subdivide arithmetically
            let min_step = self.divide_interval(step_size, max_minor_steps.saturating_add(1));
            if min_step == 0.0 {
                return (minor_ticks, medium_ticks);
            }

            let num_steps = (step_size / min_step).round() as usize;
            if num_steps == 0 {
                return (minor_ticks, medium_ticks);
            }
            let medium_index = (num_steps > 2 && num_steps % 2 == 0).then_some(num_steps / 2);

            for v in major_ticks
                .iter()
                .copied()
                .take(major_ticks.len().saturating_sub(1))
            {
                let s = base / num_steps as f64;

                if s >= 1.0 {
                    if !relative_eq(s, 1.0) {
                        minor_ticks.push(v * s);
                    }
                    for j in 2..num_steps {
                        minor_ticks.push(v * j as f64 * s);
                    }
                } else {
                    for j in 1..num_steps {
                        let tick = v + j as f64 * v * (base - 1.0) / num_steps as f64;
                        if Some(j) == medium_index {
                            medium_ticks.push(tick);
                        } else {
                            minor_ticks.push(tick);
                        }
                    }
                }
            }
        } else {
            let mut min_step = self.divide_interval(step_size, max_minor_steps);
            if min_step == 0.0 {
                return (minor_ticks, medium_ticks);
            }
            if min_step < 1.0 {
                min_step = 1.0;
            }

            // subticks per major interval
            let mut num_ticks = (step_size / min_step).round() as i64 - 1;
            if fuzzy_compare((num_ticks + 1) as f64 * min_step, step_size, step_size)
                == Ordering::Greater
            {
                num_ticks = 0;
            }
            if num_ticks < 1 {
                return (minor_ticks, medium_ticks);
            }
            let num_ticks = num_ticks as usize;
            let medium_index = (num_ticks > 2 && num_ticks % 2 == 1).then_some(num_ticks / 2);

            let min_factor = base.powf(min_step).max(base);

            for major in major_ticks.iter().copied() {
                let mut tick = major;
                for j in 0..num_ticks {
                    tick *= min_factor;
                    if Some(j) == medium_index {
                        medium_ticks.push(tick);
                    } else {
                        minor_ticks.push(tick);
                    }
                }
            }
        }

        (minor_ticks, medium_ticks)
    }
}

impl ScaleEngine for LogScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ScaleEngineSettings {
        &mut self.settings
    }

    fn auto_scale(&self, max_num_steps: u32, x1: f64, x2: f64, step_size: f64) -> (f64, f64, f64) {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let base = self.log_base_f64();

        let mut interval = Interval::new(
            x1 / base.powf(self.lower_margin()),
            x2 * base.powf(self.upper_margin()),
        );

        if interval.max_value() / interval.min_value() < base {
            // narrower than one power of the base: try a linear scale
            let (lx1, lx2, linear_step) = self
                .linear_engine()
                .auto_scale(max_num_steps, x1, x2, step_size);

            let linear_interval = Interval::new(lx1, lx2)
                .normalized()
                .limited(LOG_MIN, LOG_MAX);

            if linear_interval.max_value() / linear_interval.min_value() < base {
                // the bound order carries the direction
                let log_step = if linear_step == 0.0 {
                    0.0
                } else {
                    log_base(base, linear_step.abs())
                };
                trace!(
                    x1 = lx1,
                    x2 = lx2,
                    step_size = log_step,
                    "log auto scale fell back to linear"
                );
                return (lx1, lx2, log_step);
            }
        }

        let reference = self.reference();
        let log_ref = if reference > LOG_MIN / 2.0 {
            reference.min(LOG_MAX / 2.0)
        } else {
            1.0
        };

        if self.test_attribute(ScaleAttributes::SYMMETRIC) {
            let delta = (interval.max_value() / log_ref).max(log_ref / interval.min_value());
            interval.set_interval(log_ref / delta, log_ref * delta);
        }

        if self.test_attribute(ScaleAttributes::INCLUDE_REFERENCE) {
            interval = interval.extend(log_ref);
        }

        report_clamped(interval);
        interval = interval.limited(LOG_MIN, LOG_MAX);

        if interval.width() == 0.0 {
            // one power of the base on either side of a single value
            let value = interval.min_value();
            interval = Interval::new(value / base, value * base).limited(LOG_MIN, LOG_MAX);
        }

        let mut step_size = self.divide_interval(
            to_log_interval(base, interval).width(),
            max_num_steps.max(1),
        );
        if step_size < 1.0 {
            step_size = 1.0;
        }

        if !self.test_attribute(ScaleAttributes::FLOATING) {
            interval = self.align(interval, step_size).limited(LOG_MIN, LOG_MAX);
        }

        let (mut x1, mut x2) = (interval.min_value(), interval.max_value());

        if self.test_attribute(ScaleAttributes::INVERTED) {
            std::mem::swap(&mut x1, &mut x2);
            step_size = -step_size;
        }

        trace!(x1, x2, step_size, "log auto scale");
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
        report_clamped(interval);
        let interval = interval.limited(LOG_MIN, LOG_MAX);

        if interval.width() <= 0.0 {
            trace!(x1, x2, "empty log scale interval");
            return ScaleDivision::default();
        }

        let base = self.log_base_f64();

        if interval.max_value() / interval.min_value() < base {
            // narrower than one power of the base: build a linear scale,
            // the step hint is the exponent of the linear step
            let linear_step = if step_size == 0.0 {
                0.0
            } else {
                base.powf(step_size)
            };
            return self.linear_engine().divide_scale(
                x1,
                x2,
                max_major_steps,
                max_minor_steps,
                linear_step,
            );
        }

        let mut step_size = step_size.abs();
        if step_size == 0.0 {
            step_size = self.divide_interval(
                to_log_interval(base, interval).width(),
                max_major_steps.max(1),
            );
            // a major step covers at least one power of the base
            if step_size < 1.0 {
                step_size = 1.0;
            }
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
            "log divide scale"
        );
        division
    }
}

fn to_log_interval(base: f64, interval: Interval) -> Interval {
    Interval::new(
        log_base(base, interval.min_value()),
        log_base(base, interval.max_value()),
    )
}

fn report_clamped(interval: Interval) {
    if interval.min_value() < LOG_MIN || interval.max_value() > LOG_MAX {
        debug!(
            target: "chart_scale::log",
            min = interval.min_value(),
            max = interval.max_value(),
            "log scale bounds clamped into [1e-150, 1e150]"
        );
    }
}
