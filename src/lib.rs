//! story-rs: scene navigation engine for linear data stories.
//!
//! A story is a fixed sequence of scenes, each drawing a different
//! aggregation of one tabular dataset. This crate owns loading, aggregation,
//! navigation state and scene composition; drawing is delegated to a
//! [`render::StoryRenderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{StoryConfig, StoryEngine};
pub use error::{LoadError, StoryError, StoryResult};
