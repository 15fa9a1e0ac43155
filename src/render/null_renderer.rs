use crate::error::ChartResult;
use crate::render::{
    EstimatedTextMeasurer, FontExtents, FontSpec, RenderFrame, Renderer, TextMeasurer,
};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so tests catch invalid geometry, and keeps
/// the last frame around for inspection. Text is measured with
/// `EstimatedTextMeasurer`.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: usize,
    pub last_frame: Option<RenderFrame>,
}

impl TextMeasurer for NullRenderer {
    fn font_extents(&self, font: &FontSpec) -> FontExtents {
        EstimatedTextMeasurer.font_extents(font)
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        EstimatedTextMeasurer.text_width(text, font)
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_line_count = frame.line_count();
        self.last_text_count = frame.text_count();
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
