use tracing::trace;

use crate::core::{
    ContentType, CountryExclusions, FilteredRows, stack_by_category, top_countries,
    yearly_by_category, yearly_totals,
};
use crate::error::{StoryError, StoryResult};
use crate::interaction::Navigator;
use crate::render::{DerivedView, LegendEntry, SceneFrame, YearScope};
use crate::scene::{SceneRegistry, SceneView, TemplateParams};

/// Turns navigation state plus filtered rows into a [`SceneFrame`].
///
/// Composition is pure: the same state and rows always produce the same
/// frame. Side effects toward the renderer belong to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDispatcher {
    registry: SceneRegistry,
    exclusions: CountryExclusions,
    top_country_limit: usize,
}

impl SceneDispatcher {
    #[must_use]
    pub fn new(
        registry: SceneRegistry,
        exclusions: CountryExclusions,
        top_country_limit: usize,
    ) -> Self {
        Self {
            registry,
            exclusions,
            top_country_limit,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn compose(
        &self,
        navigator: Navigator,
        rows: &FilteredRows<'_>,
        all_time: bool,
    ) -> StoryResult<SceneFrame> {
        let state = navigator.state();
        let scene_index = state.scene_index();
        let scene = self.registry.get(scene_index)?;

        let needs_year = scene.view == SceneView::TopCountries || scene.uses_year();
        let selected_year = if needs_year {
            Some(
                state
                    .selected_year()
                    .ok_or(StoryError::MissingSelectedYear { scene_index })?,
            )
        } else {
            state.selected_year()
        };

        let scope = match (all_time, selected_year) {
            (true, _) | (false, None) => YearScope::AllTime,
            (false, Some(year)) => YearScope::Year { year },
        };

        let mut params = TemplateParams::default();
        if let Some(year) = selected_year {
            params = match (scene.view, scope) {
                (SceneView::TopCountries, YearScope::AllTime) => {
                    params.with_year(rows.window().label())
                }
                _ => params.with_year(year.to_string()),
            };
        }

        let view = match scene.view {
            SceneView::YearlyTotals => DerivedView::YearlyTotals {
                totals: yearly_totals(rows),
            },
            SceneView::YearlyByCategory => {
                let counts = yearly_by_category(rows);
                let stacked = stack_by_category(&counts);
                DerivedView::YearlyByCategory { counts, stacked }
            }
            SceneView::TopCountries => {
                let countries = match scope {
                    YearScope::Year { year } => top_countries(
                        &rows.with_release_year(year),
                        &self.exclusions,
                        self.top_country_limit,
                    ),
                    YearScope::AllTime => {
                        top_countries(rows, &self.exclusions, self.top_country_limit)
                    }
                };
                DerivedView::TopCountries { scope, countries }
            }
        };

        let legend = match scene.view {
            SceneView::YearlyByCategory => ContentType::ALL
                .into_iter()
                .map(|category| LegendEntry {
                    category,
                    label: category.label().to_owned(),
                })
                .collect(),
            _ => Vec::new(),
        };

        trace!(scene_index, bars = view.bar_count(), "composed scene frame");
        Ok(SceneFrame {
            scene_index,
            title: scene.title.render(&params)?,
            narrative: scene.narrative.render(&params)?,
            domains: view.domains(),
            view,
            annotation: scene.annotation.clone(),
            legend,
            controls: navigator.controls(),
        })
    }
}
