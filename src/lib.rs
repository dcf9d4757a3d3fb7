//! chart-scale: axis scale engines for Rust-native 2D plotting widgets.
//!
//! The crate splits into a numeric core and a drawing layer:
//! - `core` holds intervals, scale divisions, transforms, scale maps and the
//!   linear and logarithmic scale engines. It never fails; degenerate input
//!   produces empty divisions or clamped values.
//! - `api` holds serializable engine and draw configuration, the axis draw
//!   model with label caching, and the axis layout resolver.
//! - `render` holds backend-agnostic draw commands for an axis.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ScaleDraw, ScaleDrawConfig, ScaleEngineConfig};
pub use core::{
    AnyScaleEngine, Interval, LinearScaleEngine, LogScaleEngine, ScaleDivision, ScaleEngine,
    ScaleMap, TickType, Transform,
};
pub use error::{ScaleError, ScaleResult};
