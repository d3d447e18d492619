use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::core::{
    BandDomain, ChartDomains, ContentType, CountryCount, DEFAULT_NICE_TICKS, StackedSeries,
    ValueDomain, YearlyCategoryCount, YearlyCount,
};
use crate::error::{StoryError, StoryResult};
use crate::interaction::{NavigationControls, Tooltip, TooltipEntry};
use crate::scene::AnnotationSpec;

/// Which rows fed a top-countries view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YearScope {
    Year { year: i32 },
    AllTime,
}

/// Aggregation result drawn by one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DerivedView {
    YearlyTotals {
        totals: Vec<YearlyCount>,
    },
    YearlyByCategory {
        counts: Vec<YearlyCategoryCount>,
        stacked: Vec<StackedSeries>,
    },
    TopCountries {
        scope: YearScope,
        countries: Vec<CountryCount>,
    },
}

impl DerivedView {
    #[must_use]
    pub fn bar_count(&self) -> usize {
        match self {
            Self::YearlyTotals { totals } => totals.len(),
            Self::YearlyByCategory { counts, .. } => counts.len(),
            Self::TopCountries { countries, .. } => countries.len(),
        }
    }

    /// Band labels in bar order plus the value domain for this view.
    #[must_use]
    pub fn domains(&self) -> ChartDomains {
        match self {
            Self::YearlyTotals { totals } => ChartDomains {
                bands: BandDomain::new(totals.iter().map(|entry| entry.year.to_string()).collect()),
                values: ValueDomain::from_max_count(
                    totals.iter().map(|entry| entry.count).max().unwrap_or(0),
                ),
            },
            Self::YearlyByCategory { counts, .. } => ChartDomains {
                bands: BandDomain::new(counts.iter().map(|entry| entry.year.to_string()).collect()),
                values: ValueDomain::from_max_count(
                    counts.iter().map(|entry| entry.total()).max().unwrap_or(0),
                )
                .nice(DEFAULT_NICE_TICKS),
            },
            Self::TopCountries { countries, .. } => ChartDomains {
                bands: BandDomain::new(
                    countries
                        .iter()
                        .map(|entry| entry.country.clone())
                        .collect(),
                ),
                values: ValueDomain::from_max_count(
                    countries.iter().map(|entry| entry.count).max().unwrap_or(0),
                ),
            },
        }
    }

    /// Tooltip lines for bar `bar_index`, or `None` when no such bar exists.
    #[must_use]
    pub fn tooltip(&self, bar_index: usize) -> Option<Tooltip> {
        let entries = match self {
            Self::YearlyTotals { totals } => {
                let entry = totals.get(bar_index)?;
                smallvec![
                    TooltipEntry::new("Year", entry.year),
                    TooltipEntry::new("Titles Added", entry.count),
                ]
            }
            Self::YearlyByCategory { counts, .. } => {
                let entry = counts.get(bar_index)?;
                smallvec![
                    TooltipEntry::new("Year", entry.year),
                    TooltipEntry::new("Movie Count", entry.movie),
                    TooltipEntry::new("TV Count", entry.tv_show),
                ]
            }
            Self::TopCountries { countries, .. } => {
                let entry = countries.get(bar_index)?;
                smallvec![
                    TooltipEntry::new("Country", &entry.country),
                    TooltipEntry::new("Titles", entry.count),
                ]
            }
        };
        Some(Tooltip { bar_index, entries })
    }

    /// Years that can be clicked in this view. Only the stacked view offers
    /// year selection.
    #[must_use]
    pub fn selectable_years(&self) -> Vec<i32> {
        match self {
            Self::YearlyByCategory { counts, .. } => counts.iter().map(|entry| entry.year).collect(),
            _ => Vec::new(),
        }
    }
}

/// Legend swatch for one stacked category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: ContentType,
    pub label: String,
}

/// Everything the chart-drawing collaborator needs for one scene draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub scene_index: usize,
    pub title: String,
    pub narrative: String,
    pub view: DerivedView,
    pub domains: ChartDomains,
    pub annotation: Option<AnnotationSpec>,
    pub legend: Vec<LegendEntry>,
    pub controls: NavigationControls,
}

impl SceneFrame {
    pub fn validate(&self) -> StoryResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoryError::InvalidData(
                "scene title must not be empty".to_owned(),
            ));
        }
        if self.domains.bands.len() != self.view.bar_count() {
            return Err(StoryError::InvalidData(format!(
                "band domain has {} labels for {} bars",
                self.domains.bands.len(),
                self.view.bar_count()
            )));
        }
        let (start, end) = self.domains.values.domain();
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(StoryError::InvalidData(
                "value domain must be finite and increasing".to_owned(),
            ));
        }
        Ok(())
    }
}
