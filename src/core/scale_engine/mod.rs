//! Scale engines: autoscaling and tick generation for linear and
//! logarithmic axes.
//!
//! Engines only hold configuration. `auto_scale` and `divide_scale` take
//! everything else as arguments and never mutate the engine, so a configured
//! engine can be shared read-only across threads.

mod linear;
mod log;

use std::cmp::Ordering;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::core::math::{divide_interval, fuzzy_compare};
use crate::core::{Interval, ScaleDivision, Transform};

pub use linear::LinearScaleEngine;
pub use log::LogScaleEngine;

/// Upper bound on the number of major ticks one division may carry.
pub const MAX_MAJOR_TICKS: usize = 10_000;

/// Upper bound on the minor steps requested per major step.
pub const MAX_MINOR_STEPS: u32 = 100;

/// Layout attributes of a scale engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScaleAttributes(u8);

impl ScaleAttributes {
    pub const NONE: Self = Self(0x00);
    /// The reference value is always part of the autoscaled interval.
    pub const INCLUDE_REFERENCE: Self = Self(0x01);
    /// The autoscaled interval is centered on the reference value.
    pub const SYMMETRIC: Self = Self(0x02);
    /// Autoscaled bounds are not aligned to the step size.
    pub const FLOATING: Self = Self(0x04);
    /// Autoscaled bounds are swapped and the step size negated.
    pub const INVERTED: Self = Self(0x08);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn with(self, other: Self, on: bool) -> Self {
        if on {
            Self(self.0 | other.0)
        } else {
            Self(self.0 & !other.0)
        }
    }
}

impl BitOr for ScaleAttributes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Configuration shared by every engine variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleEngineSettings {
    pub attributes: ScaleAttributes,
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub reference: f64,
    pub base: u32,
    pub transform: Transform,
}

impl ScaleEngineSettings {
    #[must_use]
    pub fn new(base: u32, transform: Transform) -> Self {
        Self {
            attributes: ScaleAttributes::NONE,
            lower_margin: 0.0,
            upper_margin: 0.0,
            reference: 0.0,
            base: base.max(2),
            transform,
        }
    }
}

impl Default for ScaleEngineSettings {
    fn default() -> Self {
        Self::new(10, Transform::Identity)
    }
}

/// Contract shared by the linear and logarithmic engines.
///
/// Implementors provide the two algorithms; configuration accessors and the
/// shared helpers come as default methods over [`ScaleEngineSettings`].
pub trait ScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings;

    fn settings_mut(&mut self) -> &mut ScaleEngineSettings;

    /// Widens `[x1, x2]` to a "nice" interval for at most `max_num_steps`
    /// major steps.
    ///
    /// Returns `(x1, x2, step_size)`. `step_size` is an input hint and may
    /// be ignored.
    fn auto_scale(&self, max_num_steps: u32, x1: f64, x2: f64, step_size: f64) -> (f64, f64, f64);

    /// Computes the tick positions of `[x1, x2]`.
    ///
    /// A `step_size` of `0.0` lets the engine pick one from
    /// `max_major_steps`. `x1 > x2` produces an inverted division.
    fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: u32,
        max_minor_steps: u32,
        step_size: f64,
    ) -> ScaleDivision;

    fn set_attribute(&mut self, attribute: ScaleAttributes, on: bool) {
        let settings = self.settings_mut();
        settings.attributes = settings.attributes.with(attribute, on);
    }

    fn test_attribute(&self, attribute: ScaleAttributes) -> bool {
        self.settings().attributes.contains(attribute)
    }

    fn set_attributes(&mut self, attributes: ScaleAttributes) {
        self.settings_mut().attributes = attributes;
    }

    fn attributes(&self) -> ScaleAttributes {
        self.settings().attributes
    }

    /// Sets the margins added by `auto_scale`. Negative values become `0.0`.
    ///
    /// Linear engines add margins in scale units, logarithmic engines in
    /// powers of the base.
    fn set_margins(&mut self, lower: f64, upper: f64) {
        let settings = self.settings_mut();
        settings.lower_margin = lower.max(0.0);
        settings.upper_margin = upper.max(0.0);
    }

    fn lower_margin(&self) -> f64 {
        self.settings().lower_margin
    }

    fn upper_margin(&self) -> f64 {
        self.settings().upper_margin
    }

    fn set_reference(&mut self, reference: f64) {
        self.settings_mut().reference = reference;
    }

    fn reference(&self) -> f64 {
        self.settings().reference
    }

    /// Sets the base of the step arithmetic; values below 2 become 2.
    fn set_base(&mut self, base: u32) {
        self.settings_mut().base = base.max(2);
    }

    fn base(&self) -> u32 {
        self.settings().base
    }

    fn set_transformation(&mut self, transform: Transform) {
        self.settings_mut().transform = transform;
    }

    /// Copy of the transform consumers should install on their scale maps.
    fn transformation(&self) -> Transform {
        self.settings().transform
    }

    fn divide_interval(&self, interval_size: f64, num_steps: u32) -> f64 {
        divide_interval(interval_size, num_steps, self.base())
    }

    fn contains(&self, interval: Interval, value: f64) -> bool {
        contains(interval, value)
    }

    fn strip(&self, ticks: &[f64], interval: Interval) -> Vec<f64> {
        strip(ticks, interval)
    }

    fn build_interval(&self, value: f64) -> Interval {
        build_interval(value)
    }
}

/// Fuzzy containment: values within `1e-6 * width` of a bound count as inside.
#[must_use]
pub fn contains(interval: Interval, value: f64) -> bool {
    if !interval.is_valid() {
        return false;
    }

    let width = interval.width();
    if fuzzy_compare(value, interval.min_value(), width) == Ordering::Less {
        return false;
    }
    if fuzzy_compare(value, interval.max_value(), width) == Ordering::Greater {
        return false;
    }
    true
}

/// Drops ticks outside `interval`, using [`contains`].
#[must_use]
pub fn strip(ticks: &[f64], interval: Interval) -> Vec<f64> {
    let (Some(first), Some(last)) = (ticks.first(), ticks.last()) else {
        return Vec::new();
    };
    if !interval.is_valid() {
        return Vec::new();
    }
    if contains(interval, *first) && contains(interval, *last) {
        return ticks.to_vec();
    }

    ticks
        .iter()
        .copied()
        .filter(|tick| contains(interval, *tick))
        .collect()
}

/// Builds a small interval around a single value.
///
/// The half width is `max(|value| / 2, 0.5)`; near `f64::MAX` the interval is
/// shifted inwards instead of overflowing.
#[must_use]
pub fn build_interval(value: f64) -> Interval {
    let delta = (0.5 * value).abs().max(0.5);

    if f64::MAX - delta < value {
        return Interval::new(f64::MAX - delta, f64::MAX);
    }
    if -f64::MAX + delta > value {
        return Interval::new(-f64::MAX, -f64::MAX + delta);
    }
    Interval::new(value - delta, value + delta)
}

/// Either engine variant, without boxing.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyScaleEngine {
    Linear(LinearScaleEngine),
    Log(LogScaleEngine),
}

impl Default for AnyScaleEngine {
    fn default() -> Self {
        AnyScaleEngine::Linear(LinearScaleEngine::default())
    }
}

impl From<LinearScaleEngine> for AnyScaleEngine {
    fn from(engine: LinearScaleEngine) -> Self {
        AnyScaleEngine::Linear(engine)
    }
}

impl From<LogScaleEngine> for AnyScaleEngine {
    fn from(engine: LogScaleEngine) -> Self {
        AnyScaleEngine::Log(engine)
    }
}

impl ScaleEngine for AnyScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings {
        match self {
            AnyScaleEngine::Linear(engine) => engine.settings(),
            AnyScaleEngine::Log(engine) => engine.settings(),
        }
    }

    fn settings_mut(&mut self) -> &mut ScaleEngineSettings {
        match self {
            AnyScaleEngine::Linear(engine) => engine.settings_mut(),
            AnyScaleEngine::Log(engine) => engine.settings_mut(),
        }
    }

    fn auto_scale(&self, max_num_steps: u32, x1: f64, x2: f64, step_size: f64) -> (f64, f64, f64) {
        match self {
            AnyScaleEngine::Linear(engine) => engine.auto_scale(max_num_steps, x1, x2, step_size),
            AnyScaleEngine::Log(engine) => engine.auto_scale(max_num_steps, x1, x2, step_size),
        }
    }

    fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: u32,
        max_minor_steps: u32,
        step_size: f64,
    ) -> ScaleDivision {
        match self {
            AnyScaleEngine::Linear(engine) => {
                engine.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size)
            }
            AnyScaleEngine::Log(engine) => {
                engine.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size)
            }
        }
    }
}
