use serde::{Deserialize, Serialize};

use crate::core::math::{LOG_MAX, LOG_MIN};

/// Scalar mapping between scale space and transformed space.
///
/// Maps and engines own their own copy; cloning is cheap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Transform {
    /// `x -> x`.
    #[default]
    Identity,
    /// Natural logarithm over `[LOG_MIN, LOG_MAX]`.
    Log,
    /// Sign-preserving `x^(1/exponent)`.
    Power(f64),
}

impl Transform {
    /// Converts a scale value into transformed space.
    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        match self {
            Transform::Identity => value,
            Transform::Log => self.bounded(value).ln(),
            Transform::Power(exponent) => {
                if value < 0.0 {
                    -(-value).powf(1.0 / exponent)
                } else {
                    value.powf(1.0 / exponent)
                }
            }
        }
    }

    /// Converts a transformed value back into scale space.
    #[must_use]
    pub fn inv_transform(self, value: f64) -> f64 {
        match self {
            Transform::Identity => value,
            Transform::Log => value.exp(),
            Transform::Power(exponent) => {
                if value < 0.0 {
                    -(-value).powf(exponent)
                } else {
                    value.powf(exponent)
                }
            }
        }
    }

    /// Clamps a value into the domain the transform supports.
    ///
    /// Only the logarithmic variant restricts its domain.
    #[must_use]
    pub fn bounded(self, value: f64) -> f64 {
        match self {
            Transform::Log => value.clamp(LOG_MIN, LOG_MAX),
            Transform::Identity | Transform::Power(_) => value,
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        matches!(self, Transform::Identity)
    }
}
