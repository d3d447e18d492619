use std::path::Path;

use tracing::{debug, warn};

use crate::core::{Dataset, YearWindow, load_dataset, yearly_by_category};
use crate::error::{StoryError, StoryResult};
use crate::extensions::PluginSet;
use crate::interaction::{NavigationControls, NavigationState, Navigator, Tooltip, TooltipState};
use crate::render::{SceneFrame, StoryRenderer};
use crate::scene::SceneRegistry;

use super::{SceneDispatcher, StoryConfig, StoryEvent};

/// Main orchestration facade consumed by host applications.
///
/// `StoryEngine` owns the dataset, the navigation state machine and the
/// renderer. Every input handler runs to completion, re-rendering the
/// current scene before it returns.
///
/// A state change is kept only when the resulting scene composes; otherwise
/// navigation and toggle state roll back and the renderer is not touched.
pub struct StoryEngine<R: StoryRenderer> {
    pub(super) renderer: R,
    pub(super) dataset: Dataset,
    pub(super) window: YearWindow,
    pub(super) filtered_row_count: usize,
    pub(super) dispatcher: SceneDispatcher,
    pub(super) navigator: Navigator,
    pub(super) all_time: bool,
    pub(super) tooltip: TooltipState,
    pub(super) last_frame: Option<SceneFrame>,
    pub(super) plugins: PluginSet,
}

impl<R: StoryRenderer> StoryEngine<R> {
    /// Builds an engine over an already loaded dataset. Nothing is drawn
    /// until [`StoryEngine::render`] is called.
    pub fn new(renderer: R, dataset: Dataset, config: StoryConfig) -> StoryResult<Self> {
        let registry = config.validated_registry()?;
        Self::with_registry(renderer, dataset, &config, registry)
    }

    /// Loads the dataset from `path` and draws the first scene.
    ///
    /// The config is checked before the read. A load failure is logged and
    /// returned before the renderer is touched.
    pub fn open(renderer: R, path: impl AsRef<Path>, config: StoryConfig) -> StoryResult<Self> {
        let registry = config.validated_registry()?;
        let dataset = load_dataset(path)?;
        let mut engine = Self::with_registry(renderer, dataset, &config, registry)?;
        engine.render()?;
        Ok(engine)
    }

    fn with_registry(
        renderer: R,
        dataset: Dataset,
        config: &StoryConfig,
        registry: SceneRegistry,
    ) -> StoryResult<Self> {
        let navigator = Navigator::new(registry.len(), registry.year_picker())?;
        let window = config.year_window;
        let filtered_row_count = dataset.filtered(window).len();
        debug!(
            rows = dataset.len(),
            filtered_rows = filtered_row_count,
            scenes = registry.len(),
            "story engine ready"
        );

        Ok(Self {
            renderer,
            dataset,
            window,
            filtered_row_count,
            dispatcher: SceneDispatcher::new(
                registry,
                config.country_exclusions(),
                config.top_country_limit,
            ),
            navigator,
            all_time: config.all_time,
            tooltip: TooltipState::default(),
            last_frame: None,
            plugins: PluginSet::default(),
        })
    }

    /// Composes the current scene and hands it to the renderer.
    pub fn render(&mut self) -> StoryResult<()> {
        let frame = self.compose_current()?;
        self.present(frame)
    }

    /// "Next" control. Ignored while the control is hidden.
    pub fn next(&mut self) -> StoryResult<bool> {
        if !self.navigator.controls().next_visible {
            debug!(
                scene_index = self.navigator.state().scene_index(),
                "next control hidden; ignoring"
            );
            return Ok(false);
        }
        let previous = self.navigator;
        if !self.navigator.advance() {
            return Ok(false);
        }
        self.change_scene(previous, None)?;
        Ok(true)
    }

    /// "Previous" control. Ignored while the control is disabled.
    pub fn previous(&mut self) -> StoryResult<bool> {
        let previous = self.navigator;
        if !self.navigator.retreat() {
            return Ok(false);
        }
        self.change_scene(previous, None)?;
        Ok(true)
    }

    /// Bar click on the year picker: selects `year` and moves to the next
    /// scene.
    pub fn click_year_bar(&mut self, year: i32) -> StoryResult<()> {
        let scene_index = self.navigator.state().scene_index();
        if !self.navigator.is_on_year_picker() {
            return Err(StoryError::YearSelectionUnavailable { scene_index });
        }
        let rows = self.dataset.filtered(self.window);
        if !yearly_by_category(&rows)
            .iter()
            .any(|entry| entry.year == year)
        {
            warn!(year, scene_index, "rejecting click on a year without a bar");
            return Err(StoryError::InvalidData(format!(
                "year {year} has no bar on scene {scene_index}"
            )));
        }

        let previous = self.navigator;
        self.navigator.select_year(year)?;
        self.change_scene(previous, Some(StoryEvent::YearSelected { year }))
    }

    /// Bar click by position in the current view.
    pub fn click_bar(&mut self, bar_index: usize) -> StoryResult<()> {
        let scene_index = self.navigator.state().scene_index();
        let year = self
            .last_frame
            .as_ref()
            .filter(|frame| frame.scene_index == scene_index)
            .and_then(|frame| frame.view.selectable_years().get(bar_index).copied())
            .ok_or(StoryError::YearSelectionUnavailable { scene_index })?;
        self.click_year_bar(year)
    }

    /// All-time toggle. Re-renders the current scene when the value changes.
    pub fn set_all_time(&mut self, all_time: bool) -> StoryResult<()> {
        if self.all_time == all_time {
            return Ok(());
        }
        self.all_time = all_time;
        let frame = match self.compose_current() {
            Ok(frame) => frame,
            Err(err) => {
                self.all_time = !all_time;
                return Err(err);
            }
        };
        self.emit_story_event(StoryEvent::ScopeToggled { all_time });
        self.present(frame)
    }

    /// Pointer entered bar `bar_index` of the drawn view.
    ///
    /// Returns the shown tooltip, or `None` when nothing is drawn or the
    /// index has no bar.
    pub fn hover_bar(&mut self, bar_index: usize) -> StoryResult<Option<Tooltip>> {
        let Some(tooltip) = self
            .last_frame
            .as_ref()
            .and_then(|frame| frame.view.tooltip(bar_index))
        else {
            return Ok(None);
        };
        self.renderer.show_tooltip(&tooltip)?;
        self.tooltip.show(tooltip.clone());
        self.emit_story_event(StoryEvent::TooltipShown { bar_index });
        Ok(Some(tooltip))
    }

    /// Pointer left the hovered bar.
    pub fn pointer_out(&mut self) -> StoryResult<()> {
        self.hide_tooltip()
    }

    fn hide_tooltip(&mut self) -> StoryResult<()> {
        if self.tooltip.hide() {
            self.renderer.hide_tooltip()?;
            self.emit_story_event(StoryEvent::TooltipHidden);
        }
        Ok(())
    }

    /// Composes and checks the frame for the current state. Pure with
    /// respect to the renderer.
    pub(super) fn compose_current(&self) -> StoryResult<SceneFrame> {
        let rows = self.dataset.filtered(self.window);
        let frame = self
            .dispatcher
            .compose(self.navigator, &rows, self.all_time)?;
        frame.validate()?;
        Ok(frame)
    }

    /// Hands a composed frame to the renderer.
    ///
    /// The stored frame is dropped before the renderer is touched, so a
    /// failed draw leaves no frame rather than the previous scene's.
    pub(super) fn present(&mut self, frame: SceneFrame) -> StoryResult<()> {
        self.hide_tooltip()?;
        self.last_frame = None;
        self.renderer.clear()?;
        self.renderer.draw_scene(&frame)?;
        let scene_index = frame.scene_index;
        self.last_frame = Some(frame);
        self.emit_story_event(StoryEvent::SceneRendered { scene_index });
        Ok(())
    }

    /// Commits a navigator move made from `previous`, or rolls it back when
    /// the new scene does not compose.
    fn change_scene(&mut self, previous: Navigator, cause: Option<StoryEvent>) -> StoryResult<()> {
        let frame = match self.compose_current() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(
                    error = %err,
                    scene_index = self.navigator.state().scene_index(),
                    "scene change rolled back"
                );
                self.navigator = previous;
                return Err(err);
            }
        };
        if let Some(event) = cause {
            self.emit_story_event(event);
        }
        let from = previous.state().scene_index();
        let to = self.navigator.state().scene_index();
        self.emit_story_event(StoryEvent::SceneChanged { from, to });
        self.present(frame)
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.navigator.state()
    }

    #[must_use]
    pub fn controls(&self) -> NavigationControls {
        self.navigator.controls()
    }

    #[must_use]
    pub fn all_time(&self) -> bool {
        self.all_time
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&SceneFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.current()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        self.dispatcher.registry()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
