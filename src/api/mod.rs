//! Configuration and drawing layer on top of the scale core.

mod axis_layout;
#[cfg(feature = "parallel-division")]
mod batch;
mod engine_config;
mod label_cache;
mod label_format;
mod scale_draw;
mod scale_draw_config;

pub use axis_layout::{AxisLayout, AxisLayoutOptions, AxisLayoutPass, resolve_axis_layout};
#[cfg(feature = "parallel-division")]
pub use batch::{AxisRequest, divide_scales_parallel};
pub use engine_config::{
    SCALE_ENGINE_CONFIG_JSON_SCHEMA_V1, ScaleEngineConfig, ScaleEngineConfigJsonContractV1,
    ScaleEngineKind,
};
pub use label_cache::LabelCacheStats;
pub use label_format::{LabelFormatterFn, default_label_formatter, format_label_default};
pub use scale_draw::{
    EstimatedLabelMetrics, LabelMetrics, ScaleDraw, estimate_label_text_width_px,
};
pub use scale_draw_config::{
    MAX_TICK_LENGTH_PX, ScaleAlignment, ScaleComponents, ScaleDrawConfig,
};
