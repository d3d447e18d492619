use std::path::PathBuf;

use thiserror::Error;

pub type StoryResult<T> = Result<T, StoryError>;

/// Failure to obtain the dataset. Fatal for a story session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset `{source_name}`: {source}")]
    Malformed {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("dataset `{source_name}` has no `{column}` column")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum StoryError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("scene index {index} is out of range for {len} scenes")]
    SceneOutOfRange { index: usize, len: usize },

    #[error("year selection is not available on scene {scene_index}")]
    YearSelectionUnavailable { scene_index: usize },

    #[error("scene {scene_index} requires a selected year")]
    MissingSelectedYear { scene_index: usize },

    #[error("template parameter `{0}` has no value")]
    MissingTemplateParameter(&'static str),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),
}
