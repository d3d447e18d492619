mod dispatcher;
mod engine;
mod engine_config;
mod engine_snapshot;
mod json_contract;
mod plugin_dispatch;

pub use dispatcher::SceneDispatcher;
pub use engine::StoryEngine;
pub use engine_config::StoryConfig;
pub use engine_snapshot::StorySnapshot;
pub use json_contract::{STORY_SNAPSHOT_JSON_SCHEMA_V1, StorySnapshotJsonContractV1};

pub use crate::extensions::{PluginContext, StoryEvent, StoryPlugin};
