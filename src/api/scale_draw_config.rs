use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::core::TickType;
use crate::error::{ScaleError, ScaleResult};
use crate::render::Color;

/// Upper bound for a single tick length in pixels.
pub const MAX_TICK_LENGTH_PX: f64 = 1000.0;

/// Side of the plot canvas an axis is attached to.
///
/// Labels of a `Bottom` scale sit below the backbone, labels of a `Left`
/// scale to its left, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScaleAlignment {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl ScaleAlignment {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }
}

/// Parts of an axis that get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleComponents(u8);

impl ScaleComponents {
    pub const NONE: Self = Self(0x00);
    pub const BACKBONE: Self = Self(0x01);
    pub const TICKS: Self = Self(0x02);
    pub const LABELS: Self = Self(0x04);
    pub const ALL: Self = Self(0x07);

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

impl Default for ScaleComponents {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for ScaleComponents {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Geometry and style of a drawn axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleDrawConfig {
    pub alignment: ScaleAlignment,
    pub components: ScaleComponents,
    pub minor_tick_length_px: f64,
    pub medium_tick_length_px: f64,
    pub major_tick_length_px: f64,
    /// Gap between the tick ends and the labels.
    pub spacing_px: f64,
    pub pen_width_px: f64,
    pub font_size_px: f64,
    /// Lower bound for `ScaleDraw::extent`.
    pub minimum_extent_px: f64,
    pub color: Color,
}

impl Default for ScaleDrawConfig {
    fn default() -> Self {
        Self {
            alignment: ScaleAlignment::Bottom,
            components: ScaleComponents::ALL,
            minor_tick_length_px: 4.0,
            medium_tick_length_px: 6.0,
            major_tick_length_px: 8.0,
            spacing_px: 4.0,
            pen_width_px: 1.0,
            font_size_px: 12.0,
            minimum_extent_px: 0.0,
            color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

impl ScaleDrawConfig {
    #[must_use]
    pub fn with_alignment(mut self, alignment: ScaleAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_components(mut self, components: ScaleComponents) -> Self {
        self.components = components;
        self
    }

    #[must_use]
    pub fn with_tick_length(mut self, tick_type: TickType, length_px: f64) -> Self {
        *self.tick_length_mut(tick_type) = length_px;
        self
    }

    #[must_use]
    pub fn tick_length(&self, tick_type: TickType) -> f64 {
        match tick_type {
            TickType::Minor => self.minor_tick_length_px,
            TickType::Medium => self.medium_tick_length_px,
            TickType::Major => self.major_tick_length_px,
        }
    }

    pub(crate) fn tick_length_mut(&mut self, tick_type: TickType) -> &mut f64 {
        match tick_type {
            TickType::Minor => &mut self.minor_tick_length_px,
            TickType::Medium => &mut self.medium_tick_length_px,
            TickType::Major => &mut self.major_tick_length_px,
        }
    }

    #[must_use]
    pub fn max_tick_length(&self) -> f64 {
        TickType::ALL
            .iter()
            .map(|tick_type| self.tick_length(*tick_type))
            .fold(0.0, f64::max)
    }

    pub fn validate(self) -> ScaleResult<Self> {
        for tick_type in TickType::ALL {
            let length = self.tick_length(tick_type);
            if !length.is_finite() || !(0.0..=MAX_TICK_LENGTH_PX).contains(&length) {
                return Err(ScaleError::InvalidConfig(format!(
                    "{tick_type:?} tick length must be finite and in [0, {MAX_TICK_LENGTH_PX}]"
                )));
            }
        }
        if !self.spacing_px.is_finite() || self.spacing_px < 0.0 {
            return Err(ScaleError::InvalidConfig(
                "label spacing must be finite and >= 0".to_owned(),
            ));
        }
        if !self.pen_width_px.is_finite() || self.pen_width_px <= 0.0 {
            return Err(ScaleError::InvalidConfig(
                "pen width must be finite and > 0".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ScaleError::InvalidConfig(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.minimum_extent_px.is_finite() || self.minimum_extent_px < 0.0 {
            return Err(ScaleError::InvalidConfig(
                "minimum extent must be finite and >= 0".to_owned(),
            ));
        }
        self.color
            .validate()
            .map_err(|e| ScaleError::InvalidConfig(format!("axis color: {e}")))?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ScaleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScaleError::Serialization(format!("failed to serialize scale draw config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ScaleResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ScaleError::Serialization(format!("failed to parse scale draw config json: {e}"))
        })?;
        config.validate()
    }
}
