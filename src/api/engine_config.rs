use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CountryExclusions, DEFAULT_TOP_COUNTRY_LIMIT, YearWindow};
use crate::error::{StoryError, StoryResult};
use crate::scene::{SceneDescriptor, SceneRegistry, default_scenes};

/// Public story bootstrap configuration.
///
/// This type is serializable so hosts can keep story setup in a JSON file;
/// every field is optional and falls back to the built-in story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryConfig {
    #[serde(default)]
    pub year_window: YearWindow,
    #[serde(default = "default_top_country_limit")]
    pub top_country_limit: usize,
    /// Extra primary countries to drop, on top of the always-excluded ones.
    #[serde(default)]
    pub excluded_countries: Vec<String>,
    /// Initial state of the all-time toggle.
    #[serde(default)]
    pub all_time: bool,
    #[serde(default = "default_scenes")]
    pub scenes: Vec<SceneDescriptor>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            year_window: YearWindow::default(),
            top_country_limit: default_top_country_limit(),
            excluded_countries: Vec::new(),
            all_time: false,
            scenes: default_scenes(),
        }
    }
}

impl StoryConfig {
    /// Sets the exclusive release-year window.
    #[must_use]
    pub fn with_year_window(mut self, window: YearWindow) -> Self {
        self.year_window = window;
        self
    }

    /// Sets how many countries the top-countries view keeps.
    #[must_use]
    pub fn with_top_country_limit(mut self, limit: usize) -> Self {
        self.top_country_limit = limit;
        self
    }

    /// Adds a primary country to the exclusion set.
    #[must_use]
    pub fn with_excluded_country(mut self, country: impl Into<String>) -> Self {
        self.excluded_countries.push(country.into());
        self
    }

    /// Sets the initial all-time toggle state.
    #[must_use]
    pub fn with_all_time(mut self, all_time: bool) -> Self {
        self.all_time = all_time;
        self
    }

    /// Replaces the scene list.
    #[must_use]
    pub fn with_scenes(mut self, scenes: Vec<SceneDescriptor>) -> Self {
        self.scenes = scenes;
        self
    }

    pub fn from_json_str(input: &str) -> StoryResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| StoryError::InvalidConfig(format!("failed to parse story config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            StoryError::InvalidConfig(format!("failed to read `{}`: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> StoryResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            StoryError::InvalidConfig(format!("failed to serialize story config: {e}"))
        })
    }

    pub fn validate(&self) -> StoryResult<()> {
        self.validated_registry().map(|_| ())
    }

    /// Checks every field and returns the scene registry built on the way.
    pub fn validated_registry(&self) -> StoryResult<SceneRegistry> {
        self.year_window.validate()?;
        if self.top_country_limit == 0 {
            return Err(StoryError::InvalidConfig(
                "top_country_limit must be > 0".to_owned(),
            ));
        }
        SceneRegistry::new(self.scenes.clone())
    }

    #[must_use]
    pub fn country_exclusions(&self) -> CountryExclusions {
        let mut exclusions = CountryExclusions::default();
        exclusions.extend(self.excluded_countries.iter().cloned());
        exclusions
    }
}

fn default_top_country_limit() -> usize {
    DEFAULT_TOP_COUNTRY_LIMIT
}
