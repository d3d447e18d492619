use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::interaction::NavigationState;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginContext {
    pub navigation: NavigationState,
    pub scene_count: usize,
    pub all_time: bool,
    pub filtered_row_count: usize,
    pub tooltip_visible: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryEvent {
    SceneChanged { from: usize, to: usize },
    YearSelected { year: i32 },
    ScopeToggled { all_time: bool },
    TooltipShown { bar_index: usize },
    TooltipHidden,
    SceneRendered { scene_index: usize },
}

/// Extension hook interface for observing a story.
///
/// Plugins see events and read context; they never mutate navigation.
pub trait StoryPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: StoryEvent, context: PluginContext);
}

/// Registered plugins in registration order, keyed by a unique id.
#[derive(Default)]
pub struct PluginSet {
    entries: Vec<Box<dyn StoryPlugin>>,
}

impl PluginSet {
    /// Adds `plugin` after its id is checked.
    ///
    /// Ids are compared after trimming, so `" audit"` and `"audit"` collide.
    /// `catch_up` is delivered to the new plugin alone, before it joins the
    /// broadcast list, so a late observer still learns the current scene.
    pub fn insert(
        &mut self,
        mut plugin: Box<dyn StoryPlugin>,
        catch_up: Option<(StoryEvent, PluginContext)>,
    ) -> StoryResult<()> {
        let id = plugin.id().trim();
        if id.is_empty() {
            return Err(StoryError::InvalidData(
                "plugin id must not be blank".to_owned(),
            ));
        }
        if self.contains(id) {
            return Err(StoryError::InvalidData(format!(
                "plugin `{id}` is already observing this story"
            )));
        }
        if let Some((event, context)) = catch_up {
            plugin.on_event(event, context);
        }
        self.entries.push(plugin);
        Ok(())
    }

    /// Detaches the plugin with `id`, returning it to the host.
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn StoryPlugin>> {
        let id = id.trim();
        let index = self
            .entries
            .iter()
            .position(|plugin| plugin.id().trim() == id)?;
        Some(self.entries.remove(index))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        let id = id.trim();
        self.entries.iter().any(|plugin| plugin.id().trim() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every plugin in registration order.
    pub fn broadcast(&mut self, event: StoryEvent, context: PluginContext) {
        for plugin in &mut self.entries {
            plugin.on_event(event, context);
        }
    }
}
