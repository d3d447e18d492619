use serde::{Deserialize, Serialize};

use crate::error::StoryResult;
use crate::interaction::{NavigationControls, NavigationState, Tooltip};
use crate::render::{SceneFrame, StoryRenderer};

use super::StoryEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// the walkthrough tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySnapshot {
    pub navigation: NavigationState,
    pub controls: NavigationControls,
    pub all_time: bool,
    pub scene_count: usize,
    pub filtered_row_count: usize,
    pub frame: Option<SceneFrame>,
    pub tooltip: Option<Tooltip>,
}

impl<R: StoryRenderer> StoryEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> StorySnapshot {
        StorySnapshot {
            navigation: self.navigator.state(),
            controls: self.navigator.controls(),
            all_time: self.all_time,
            scene_count: self.navigator.scene_count(),
            filtered_row_count: self.filtered_row_count,
            frame: self.last_frame.clone(),
            tooltip: self.tooltip.current().cloned(),
        }
    }

    /// Restores navigation and toggle state from a snapshot and re-renders.
    ///
    /// The frame and tooltip inside the snapshot are not trusted; the scene
    /// is recomposed from the dataset. Nothing changes when the restored
    /// state does not compose.
    pub fn restore_snapshot(&mut self, snapshot: &StorySnapshot) -> StoryResult<()> {
        let (navigator, all_time) = (self.navigator, self.all_time);
        self.navigator.restore(snapshot.navigation)?;
        self.all_time = snapshot.all_time;
        match self.compose_current() {
            Ok(frame) => self.present(frame),
            Err(err) => {
                self.navigator = navigator;
                self.all_time = all_time;
                Err(err)
            }
        }
    }
}
