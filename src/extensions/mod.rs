//! Optional observers of a running story live here.
//!
//! Keep extensions decoupled from the dispatch path: they receive events after
//! state changes and cannot alter them.

pub mod plugins;

pub use plugins::{PluginContext, PluginSet, StoryEvent, StoryPlugin};
