use tracing::{debug, trace};

use crate::error::StoryResult;
use crate::extensions::{PluginContext, StoryPlugin};
use crate::render::StoryRenderer;

use super::{StoryEngine, StoryEvent};

impl<R: StoryRenderer> StoryEngine<R> {
    /// Attaches an observer.
    ///
    /// When a scene is already on screen the new plugin first receives
    /// `SceneRendered` for it, so every observer sees the scene it joined on.
    pub fn register_plugin(&mut self, plugin: Box<dyn StoryPlugin>) -> StoryResult<()> {
        let catch_up = self.last_frame.as_ref().map(|frame| {
            (
                StoryEvent::SceneRendered {
                    scene_index: frame.scene_index,
                },
                self.plugin_context(),
            )
        });
        let id = plugin.id().trim().to_owned();
        let caught_up = catch_up.is_some();
        self.plugins.insert(plugin, catch_up)?;
        debug!(plugin = %id, caught_up, "plugin attached");
        Ok(())
    }

    /// Detaches the plugin with `plugin_id` and hands it back to the host.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> Option<Box<dyn StoryPlugin>> {
        self.plugins.remove(plugin_id)
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.contains(plugin_id)
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            navigation: self.navigator.state(),
            scene_count: self.navigator.scene_count(),
            all_time: self.all_time,
            filtered_row_count: self.filtered_row_count,
            tooltip_visible: self.tooltip.is_visible(),
        }
    }

    pub(super) fn emit_story_event(&mut self, event: StoryEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.plugins.len(), "dispatch story event");
        self.plugins.broadcast(event, context);
    }
}
