use serde::{Deserialize, Serialize};

use crate::core::Interval;

/// Tier of a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickType {
    /// Finest subdivision.
    Minor,
    /// Middle subdivision of a major step split into an odd number of parts.
    Medium,
    /// Labeled primary division.
    Major,
}

impl TickType {
    pub const ALL: [TickType; 3] = [TickType::Minor, TickType::Medium, TickType::Major];

    #[must_use]
    const fn index(self) -> usize {
        match self {
            TickType::Minor => 0,
            TickType::Medium => 1,
            TickType::Major => 2,
        }
    }
}

/// Bounds of a scale plus its minor, medium and major tick positions.
///
/// `lower_bound > upper_bound` describes an inverted axis; tick lists are
/// then ordered from `lower_bound` towards `upper_bound` as well.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleDivision {
    lower_bound: f64,
    upper_bound: f64,
    ticks: [Vec<f64>; 3],
}

impl ScaleDivision {
    /// Division without ticks.
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            ticks: Default::default(),
        }
    }

    #[must_use]
    pub fn from_interval(interval: Interval, ticks: [Vec<f64>; 3]) -> Self {
        Self {
            lower_bound: interval.min_value(),
            upper_bound: interval.max_value(),
            ticks,
        }
    }

    #[must_use]
    pub fn with_ticks(
        lower_bound: f64,
        upper_bound: f64,
        minor_ticks: Vec<f64>,
        medium_ticks: Vec<f64>,
        major_ticks: Vec<f64>,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            ticks: [minor_ticks, medium_ticks, major_ticks],
        }
    }

    pub fn set_interval(&mut self, lower_bound: f64, upper_bound: f64) {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
    }

    /// Bounds as an interval; inverted divisions give an inverted interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval::new(self.lower_bound, self.upper_bound)
    }

    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn set_lower_bound(&mut self, lower_bound: f64) {
        self.lower_bound = lower_bound;
    }

    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn set_upper_bound(&mut self, upper_bound: f64) {
        self.upper_bound = upper_bound;
    }

    /// `upper_bound - lower_bound`, negative for inverted divisions.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    #[must_use]
    pub fn is_increasing(&self) -> bool {
        self.lower_bound <= self.upper_bound
    }

    /// Whether `value` lies between the bounds, in either direction.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let min = self.lower_bound.min(self.upper_bound);
        let max = self.lower_bound.max(self.upper_bound);
        value >= min && value <= max
    }

    #[must_use]
    pub fn ticks(&self, tick_type: TickType) -> &[f64] {
        &self.ticks[tick_type.index()]
    }

    pub fn set_ticks(&mut self, tick_type: TickType, ticks: Vec<f64>) {
        self.ticks[tick_type.index()] = ticks;
    }

    /// Swaps the bounds and reverses every tick list.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.lower_bound, &mut self.upper_bound);
        for ticks in &mut self.ticks {
            ticks.reverse();
        }
    }

    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut other = self.clone();
        other.invert();
        other
    }

    /// Copy with new bounds, dropping ticks outside of them.
    #[must_use]
    pub fn bounded(&self, lower_bound: f64, upper_bound: f64) -> Self {
        let min = lower_bound.min(upper_bound);
        let max = lower_bound.max(upper_bound);

        let mut division = Self::new(lower_bound, upper_bound);
        for tick_type in TickType::ALL {
            let bounded_ticks = self
                .ticks(tick_type)
                .iter()
                .copied()
                .filter(|tick| *tick >= min && *tick <= max)
                .collect();
            division.set_ticks(tick_type, bounded_ticks);
        }
        division
    }
}
