mod frame;
mod null_renderer;
mod primitives;

pub use frame::AxisFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign};

use crate::error::ScaleResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `AxisFrame`, so drawing code stays
/// isolated from scale arithmetic.
pub trait Renderer {
    fn render(&mut self, frame: &AxisFrame) -> ScaleResult<()>;
}
