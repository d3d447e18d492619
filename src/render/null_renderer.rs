use crate::error::StoryResult;
use crate::interaction::Tooltip;
use crate::render::{SceneFrame, StoryRenderer};

/// Headless renderer used by tests and the walkthrough tool.
///
/// It still validates frames so tests catch inconsistent views before a real
/// backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub clear_count: usize,
    pub draw_count: usize,
    pub last_frame: Option<SceneFrame>,
    pub tooltip: Option<Tooltip>,
}

impl StoryRenderer for NullRenderer {
    fn clear(&mut self) -> StoryResult<()> {
        self.clear_count += 1;
        self.last_frame = None;
        Ok(())
    }

    fn draw_scene(&mut self, frame: &SceneFrame) -> StoryResult<()> {
        frame.validate()?;
        self.draw_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) -> StoryResult<()> {
        self.tooltip = Some(tooltip.clone());
        Ok(())
    }

    fn hide_tooltip(&mut self) -> StoryResult<()> {
        self.tooltip = None;
        Ok(())
    }
}
