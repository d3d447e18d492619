use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoryError, StoryResult};

use super::StorySnapshot;

pub const STORY_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned wrapper written by the walkthrough tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: StorySnapshot,
}

impl From<StorySnapshot> for StorySnapshotJsonContractV1 {
    fn from(snapshot: StorySnapshot) -> Self {
        Self {
            schema_version: STORY_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot,
        }
    }
}

impl StorySnapshot {
    pub fn to_json_pretty(&self) -> StoryResult<String> {
        pretty_json(self, "snapshot")
    }

    pub fn to_json_contract_v1_pretty(&self) -> StoryResult<String> {
        pretty_json(
            &StorySnapshotJsonContractV1::from(self.clone()),
            "snapshot contract v1",
        )
    }

    /// Reads a bare snapshot or a versioned payload.
    ///
    /// A top-level `schema_version` key selects the wrapped form. The result
    /// must describe a reachable story state: the scene exists, the frame
    /// belongs to it and a tooltip points at one of its bars.
    pub fn from_json_compat_str(input: &str) -> StoryResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| StoryError::InvalidData(format!("snapshot payload is not json: {e}")))?;

        let snapshot = match value.get("schema_version").map(Value::as_u64) {
            None => decode::<StorySnapshot>(value, "snapshot")?,
            Some(Some(version)) if version == u64::from(STORY_SNAPSHOT_JSON_SCHEMA_V1) => {
                decode::<StorySnapshotJsonContractV1>(value, "snapshot contract v1")?.snapshot
            }
            Some(version) => {
                return Err(StoryError::InvalidData(format!(
                    "unsupported snapshot schema version: {}",
                    version.map_or_else(|| "non-numeric".to_owned(), |v| v.to_string())
                )));
            }
        };
        snapshot.check_reachable()?;
        Ok(snapshot)
    }

    fn check_reachable(&self) -> StoryResult<()> {
        let scene_index = self.navigation.scene_index();
        if scene_index >= self.scene_count {
            return Err(StoryError::SceneOutOfRange {
                index: scene_index,
                len: self.scene_count,
            });
        }
        if let Some(frame) = &self.frame {
            if frame.scene_index != scene_index {
                return Err(StoryError::InvalidData(format!(
                    "snapshot frame is for scene {} but navigation is on scene {scene_index}",
                    frame.scene_index
                )));
            }
        }
        if let Some(tooltip) = &self.tooltip {
            let bars = self.frame.as_ref().map_or(0, |frame| frame.view.bar_count());
            if tooltip.bar_index >= bars {
                return Err(StoryError::InvalidData(format!(
                    "snapshot tooltip points at bar {} of {bars}",
                    tooltip.bar_index
                )));
            }
        }
        Ok(())
    }
}

fn pretty_json<T: Serialize>(value: &T, what: &str) -> StoryResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| StoryError::InvalidData(format!("failed to serialize {what}: {e}")))
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> StoryResult<T> {
    serde_json::from_value(value)
        .map_err(|e| StoryError::InvalidData(format!("failed to parse {what}: {e}")))
}
