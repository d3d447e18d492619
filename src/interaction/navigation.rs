use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoryError, StoryResult};

/// Current position in the story plus the one cross-scene parameter.
///
/// Only [`Navigator`] transitions mutate it; everything else reads copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    scene_index: usize,
    selected_year: Option<i32>,
}

impl NavigationState {
    #[must_use]
    pub fn scene_index(self) -> usize {
        self.scene_index
    }

    #[must_use]
    pub fn selected_year(self) -> Option<i32> {
        self.selected_year
    }
}

/// Visibility of the previous/next controls for the current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationControls {
    pub previous_enabled: bool,
    pub next_visible: bool,
}

/// Bounded scene state machine.
///
/// `advance`/`retreat` saturate at the ends. `select_year` is accepted only
/// on the year picker scene; it stores the year and advances in one step. The
/// selected year is never cleared, so walking back and forth keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    scene_count: usize,
    year_picker: Option<usize>,
    state: NavigationState,
}

impl Navigator {
    pub fn new(scene_count: usize, year_picker: Option<usize>) -> StoryResult<Self> {
        if scene_count == 0 {
            return Err(StoryError::InvalidConfig(
                "navigation needs at least one scene".to_owned(),
            ));
        }
        if let Some(picker) = year_picker.filter(|picker| *picker >= scene_count) {
            return Err(StoryError::SceneOutOfRange {
                index: picker,
                len: scene_count,
            });
        }

        Ok(Self {
            scene_count,
            year_picker,
            state: NavigationState::default(),
        })
    }

    /// Restores a previously captured state, e.g. from a snapshot.
    pub fn restore(&mut self, state: NavigationState) -> StoryResult<()> {
        if state.scene_index >= self.scene_count {
            return Err(StoryError::SceneOutOfRange {
                index: state.scene_index,
                len: self.scene_count,
            });
        }
        let past_picker = self
            .year_picker
            .is_some_and(|picker| state.scene_index > picker);
        if past_picker && state.selected_year.is_none() {
            return Err(StoryError::MissingSelectedYear {
                scene_index: state.scene_index,
            });
        }
        self.state = state;
        Ok(())
    }

    #[must_use]
    pub fn state(self) -> NavigationState {
        self.state
    }

    #[must_use]
    pub fn scene_count(self) -> usize {
        self.scene_count
    }

    #[must_use]
    pub fn year_picker(self) -> Option<usize> {
        self.year_picker
    }

    #[must_use]
    pub fn is_on_year_picker(self) -> bool {
        self.year_picker == Some(self.state.scene_index)
    }

    /// Moves forward one scene. Returns `false` at the last scene.
    pub fn advance(&mut self) -> bool {
        if self.state.scene_index + 1 >= self.scene_count {
            return false;
        }
        self.state.scene_index += 1;
        debug!(scene_index = self.state.scene_index, "advance");
        true
    }

    /// Moves back one scene. Returns `false` at the first scene.
    pub fn retreat(&mut self) -> bool {
        if self.state.scene_index == 0 {
            return false;
        }
        self.state.scene_index -= 1;
        debug!(scene_index = self.state.scene_index, "retreat");
        true
    }

    /// Stores `year` and advances. The last selection wins.
    pub fn select_year(&mut self, year: i32) -> StoryResult<()> {
        if !self.is_on_year_picker() {
            return Err(StoryError::YearSelectionUnavailable {
                scene_index: self.state.scene_index,
            });
        }
        debug!(
            year,
            previous = ?self.state.selected_year,
            "select year"
        );
        self.state.selected_year = Some(year);
        self.advance();
        Ok(())
    }

    /// The previous control is disabled on the first scene. The next control
    /// is hidden on the year picker, which is left by clicking a bar, and on
    /// the last scene.
    #[must_use]
    pub fn controls(self) -> NavigationControls {
        let index = self.state.scene_index;
        NavigationControls {
            previous_enabled: index > 0,
            next_visible: !(self.year_picker == Some(index) || index + 1 == self.scene_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_scene_without_year() {
        let navigator = Navigator::new(3, Some(1)).expect("navigator");
        assert_eq!(navigator.state(), NavigationState::default());
        assert_eq!(
            navigator.controls(),
            NavigationControls {
                previous_enabled: false,
                next_visible: true,
            }
        );
    }

    #[test]
    fn rejects_picker_outside_scene_list() {
        assert!(Navigator::new(3, Some(3)).is_err());
        assert!(Navigator::new(0, None).is_err());
    }

    #[test]
    fn restore_rejects_year_scoped_scene_without_year() {
        let mut navigator = Navigator::new(3, Some(1)).expect("navigator");
        let state = NavigationState {
            scene_index: 2,
            selected_year: None,
        };
        let err = navigator.restore(state).expect_err("year is required");
        assert!(matches!(
            err,
            StoryError::MissingSelectedYear { scene_index: 2 }
        ));
    }
}
