use crate::error::ScaleResult;
use crate::render::{AxisFrame, Renderer};

/// No-op renderer used by tests and headless layout runs.
///
/// It still validates frame content so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &AxisFrame) -> ScaleResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        self.frames_rendered = self.frames_rendered.saturating_add(1);
        Ok(())
    }
}
