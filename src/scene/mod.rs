//! Static, ordered scene descriptors.
//!
//! A registry is pure configuration: it is validated once when the engine is
//! built and never mutated afterwards.

mod defaults;
mod template;

pub use defaults::default_scenes;
pub use template::{TemplateParam, TemplateParams, TemplateSegment, TextTemplate};

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// Derived view a scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneView {
    YearlyTotals,
    YearlyByCategory,
    TopCountries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationNote {
    pub title: String,
    pub label: String,
    /// Wrap width of the note text in pixels.
    pub wrap: f64,
}

/// Callout attached to a scene: the subject point and the note offset from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub note: AnnotationNote,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl AnnotationSpec {
    fn validate(&self) -> StoryResult<()> {
        for (value, name) in [
            (self.x, "x"),
            (self.y, "y"),
            (self.dx, "dx"),
            (self.dy, "dy"),
        ] {
            if !value.is_finite() {
                return Err(StoryError::InvalidConfig(format!(
                    "annotation `{name}` must be finite"
                )));
            }
        }
        if !self.note.wrap.is_finite() || self.note.wrap <= 0.0 {
            return Err(StoryError::InvalidConfig(
                "annotation wrap must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub title: TextTemplate,
    /// May contain inline markup; passed through untouched.
    pub narrative: TextTemplate,
    pub view: SceneView,
    #[serde(default)]
    pub annotation: Option<AnnotationSpec>,
}

impl SceneDescriptor {
    #[must_use]
    pub fn new(title: TextTemplate, narrative: TextTemplate, view: SceneView) -> Self {
        Self {
            title,
            narrative,
            view,
            annotation: None,
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotation = Some(annotation);
        self
    }

    #[must_use]
    pub fn uses_year(&self) -> bool {
        self.title.uses(TemplateParam::Year) || self.narrative.uses(TemplateParam::Year)
    }
}

/// Ordered scene list.
///
/// The first `YearlyByCategory` scene is the year picker: clicking one of its
/// bars selects a year and moves to the following scene. Every scene after
/// the picker can rely on a selected year; no scene before it can.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
    year_picker: Option<usize>,
}

impl SceneRegistry {
    pub fn new(scenes: Vec<SceneDescriptor>) -> StoryResult<Self> {
        if scenes.is_empty() {
            return Err(StoryError::InvalidConfig(
                "a story needs at least one scene".to_owned(),
            ));
        }

        let year_picker = scenes
            .iter()
            .position(|scene| scene.view == SceneView::YearlyByCategory);

        for (index, scene) in scenes.iter().enumerate() {
            if scene.title.is_blank() {
                return Err(StoryError::InvalidConfig(format!(
                    "scene {index} has a blank title"
                )));
            }
            if let Some(annotation) = &scene.annotation {
                annotation.validate()?;
            }
            let needs_year = scene.view == SceneView::TopCountries || scene.uses_year();
            if needs_year && year_picker.is_none_or(|picker| index <= picker) {
                return Err(StoryError::InvalidConfig(format!(
                    "scene {index} needs a selected year but is reachable before one is picked"
                )));
            }
        }

        Ok(Self {
            scenes,
            year_picker,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> StoryResult<&SceneDescriptor> {
        self.scenes.get(index).ok_or(StoryError::SceneOutOfRange {
            index,
            len: self.scenes.len(),
        })
    }

    #[must_use]
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    #[must_use]
    pub fn year_picker(&self) -> Option<usize> {
        self.year_picker
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self {
            year_picker: Some(1),
            scenes: default_scenes(),
        }
    }
}
