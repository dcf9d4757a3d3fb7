pub mod interval;
pub mod math;
pub mod scale_div;
pub mod scale_engine;
pub mod scale_map;
pub mod transform;
pub mod types;

pub use interval::{BorderFlags, Interval};
pub use scale_div::{ScaleDivision, TickType};
pub use scale_engine::{
    AnyScaleEngine, LinearScaleEngine, LogScaleEngine, MAX_MAJOR_TICKS, MAX_MINOR_STEPS,
    ScaleAttributes, ScaleEngine, ScaleEngineSettings,
};
pub use scale_map::{
    ScaleMap, inv_transform_point, inv_transform_rect, transform_point, transform_rect,
};
pub use transform::Transform;
pub use types::{Point, Rect};
