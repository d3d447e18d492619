mod frame;
mod null_renderer;

pub use frame::{DerivedView, LegendEntry, SceneFrame, YearScope};
pub use null_renderer::NullRenderer;

use crate::error::StoryResult;
use crate::interaction::Tooltip;

/// Contract implemented by the chart-drawing collaborator.
///
/// The engine clears before every scene draw and hands over a fully
/// materialized [`SceneFrame`], so drawing code never touches navigation
/// or aggregation.
pub trait StoryRenderer {
    /// Removes all output of the previous draw.
    fn clear(&mut self) -> StoryResult<()>;

    fn draw_scene(&mut self, frame: &SceneFrame) -> StoryResult<()>;

    fn show_tooltip(&mut self, _tooltip: &Tooltip) -> StoryResult<()> {
        Ok(())
    }

    fn hide_tooltip(&mut self) -> StoryResult<()> {
        Ok(())
    }
}
