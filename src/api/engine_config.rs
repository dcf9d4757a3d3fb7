use serde::{Deserialize, Serialize};

use crate::core::{
    AnyScaleEngine, LinearScaleEngine, LogScaleEngine, ScaleAttributes, ScaleEngine, Transform,
};
use crate::error::{ScaleError, ScaleResult};

pub const SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Engine variant selected by a [`ScaleEngineConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleEngineKind {
    /// Uniform spacing in scale units.
    #[default]
    Linear,
    /// Uniform spacing in powers of the base.
    Logarithmic,
}

/// Serializable scale engine setup.
///
/// Host applications persist this instead of engine instances; `build`
/// validates it and produces a ready engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleEngineConfig {
    #[serde(default)]
    pub kind: ScaleEngineKind,
    #[serde(default = "default_base")]
    pub base: u32,
    #[serde(default)]
    pub lower_margin: f64,
    #[serde(default)]
    pub upper_margin: f64,
    #[serde(default)]
    pub reference: f64,
    #[serde(default)]
    pub include_reference: bool,
    #[serde(default)]
    pub symmetric: bool,
    #[serde(default)]
    pub floating: bool,
    #[serde(default)]
    pub inverted: bool,
    /// Overrides the transform the engine hands to scale maps.
    #[serde(default)]
    pub transform: Option<Transform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleEngineConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ScaleEngineConfig,
}

impl Default for ScaleEngineConfig {
    fn default() -> Self {
        Self::new(ScaleEngineKind::Linear)
    }
}

impl ScaleEngineConfig {
    #[must_use]
    pub fn new(kind: ScaleEngineKind) -> Self {
        Self {
            kind,
            base: default_base(),
            lower_margin: 0.0,
            upper_margin: 0.0,
            reference: 0.0,
            include_reference: false,
            symmetric: false,
            floating: false,
            inverted: false,
            transform: None,
        }
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::new(ScaleEngineKind::Linear)
    }

    #[must_use]
    pub fn logarithmic() -> Self {
        Self::new(ScaleEngineKind::Logarithmic)
    }

    #[must_use]
    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, lower_margin: f64, upper_margin: f64) -> Self {
        self.lower_margin = lower_margin;
        self.upper_margin = upper_margin;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: f64) -> Self {
        self.reference = reference;
        self
    }

    /// Sets every attribute flag from a combined attribute set.
    #[must_use]
    pub fn with_attributes(mut self, attributes: ScaleAttributes) -> Self {
        self.include_reference = attributes.contains(ScaleAttributes::INCLUDE_REFERENCE);
        self.symmetric = attributes.contains(ScaleAttributes::SYMMETRIC);
        self.floating = attributes.contains(ScaleAttributes::FLOATING);
        self.inverted = attributes.contains(ScaleAttributes::INVERTED);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    #[must_use]
    pub fn attributes(&self) -> ScaleAttributes {
        ScaleAttributes::NONE
            .with(ScaleAttributes::INCLUDE_REFERENCE, self.include_reference)
            .with(ScaleAttributes::SYMMETRIC, self.symmetric)
            .with(ScaleAttributes::FLOATING, self.floating)
            .with(ScaleAttributes::INVERTED, self.inverted)
    }

    pub fn validate(self) -> ScaleResult<Self> {
        if self.base < 2 {
            return Err(ScaleError::InvalidConfig(format!(
                "scale base must be >= 2, got {}",
                self.base
            )));
        }
        if !self.lower_margin.is_finite()
            || !self.upper_margin.is_finite()
            || self.lower_margin < 0.0
            || self.upper_margin < 0.0
        {
            return Err(ScaleError::InvalidConfig(
                "scale margins must be finite and >= 0".to_owned(),
            ));
        }
        if !self.reference.is_finite() {
            return Err(ScaleError::InvalidConfig(
                "scale reference must be finite".to_owned(),
            ));
        }
        if let Some(Transform::Power(exponent)) = self.transform {
            if !exponent.is_finite() || exponent == 0.0 {
                return Err(ScaleError::InvalidConfig(
                    "power transform exponent must be finite and non-zero".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    /// Validates the config and builds the matching engine.
    pub fn build(self) -> ScaleResult<AnyScaleEngine> {
        let config = self.validate()?;

        let mut engine = match config.kind {
            ScaleEngineKind::Linear => AnyScaleEngine::from(LinearScaleEngine::new(config.base)),
            ScaleEngineKind::Logarithmic => AnyScaleEngine::from(LogScaleEngine::new(config.base)),
        };
        engine.set_attributes(config.attributes());
        engine.set_margins(config.lower_margin, config.upper_margin);
        engine.set_reference(config.reference);
        if let Some(transform) = config.transform {
            engine.set_transformation(transform);
        }
        Ok(engine)
    }

    pub fn to_json_pretty(&self) -> ScaleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScaleError::Serialization(format!("failed to serialize scale engine config: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ScaleResult<String> {
        let payload = ScaleEngineConfigJsonContractV1 {
            schema_version: SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ScaleError::Serialization(format!(
                "failed to serialize scale engine config contract v1: {e}"
            ))
        })
    }

    /// Parses either a bare config or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ScaleResult<Self> {
        if let Ok(config) = serde_json::from_str::<ScaleEngineConfig>(input) {
            return config.validate();
        }
        let payload: ScaleEngineConfigJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ScaleError::Serialization(format!(
                    "failed to parse scale engine config json payload: {e}"
                ))
            })?;
        if payload.schema_version != SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1 {
            return Err(ScaleError::Serialization(format!(
                "unsupported scale engine config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()
    }
}

fn default_base() -> u32 {
    10
}
