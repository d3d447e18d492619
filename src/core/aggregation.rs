use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::{ContentType, FilteredRows};

/// Number of countries kept by the top-countries view unless configured.
pub const DEFAULT_TOP_COUNTRY_LIMIT: usize = 10;

/// Country always removed from the top-countries view so other producers
/// stay visible.
pub const DOMINANT_COUNTRY: &str = "United States";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    pub year: i32,
    pub count: usize,
}

/// Per-year split by category. `movie + tv_show` equals the year's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCategoryCount {
    pub year: i32,
    #[serde(rename = "Movie")]
    pub movie: usize,
    #[serde(rename = "TV Show")]
    pub tv_show: usize,
}

impl YearlyCategoryCount {
    #[must_use]
    pub fn count(self, kind: ContentType) -> usize {
        match kind {
            ContentType::Movie => self.movie,
            ContentType::TvShow => self.tv_show,
        }
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.movie + self.tv_show
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Primary-country keys removed before ranking.
///
/// The dominant country and the empty key are always present; callers may
/// add more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryExclusions {
    keys: BTreeSet<String>,
}

impl Default for CountryExclusions {
    fn default() -> Self {
        Self {
            keys: [DOMINANT_COUNTRY.to_owned(), String::new()]
                .into_iter()
                .collect(),
        }
    }
}

impl CountryExclusions {
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.keys.insert(country.into().trim().to_owned());
        self
    }

    #[must_use]
    pub fn contains(&self, country: &str) -> bool {
        self.keys.contains(country)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for CountryExclusions {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for country in iter {
            self.keys.insert(country.into().trim().to_owned());
        }
    }
}

/// Groups rows by release year and counts them, ascending by year.
#[must_use]
pub fn yearly_totals(rows: &FilteredRows<'_>) -> Vec<YearlyCount> {
    let mut counts = BTreeMap::<i32, usize>::new();
    for year in rows.iter().filter_map(|row| row.release_year) {
        *counts.entry(year).or_default() += 1;
    }
    let totals: Vec<YearlyCount> = counts
        .into_iter()
        .map(|(year, count)| YearlyCount { year, count })
        .collect();
    trace!(years = totals.len(), rows = rows.len(), "yearly totals");
    totals
}

/// Groups rows by release year, then splits each year by category.
#[must_use]
pub fn yearly_by_category(rows: &FilteredRows<'_>) -> Vec<YearlyCategoryCount> {
    let mut counts = BTreeMap::<i32, YearlyCategoryCount>::new();
    for row in rows.iter() {
        let (Some(year), Some(kind)) = (row.release_year, row.content_type) else {
            continue;
        };
        let entry = counts.entry(year).or_insert(YearlyCategoryCount {
            year,
            movie: 0,
            tv_show: 0,
        });
        match kind {
            ContentType::Movie => entry.movie += 1,
            ContentType::TvShow => entry.tv_show += 1,
        }
    }
    let by_category: Vec<YearlyCategoryCount> = counts.into_values().collect();
    trace!(
        years = by_category.len(),
        rows = rows.len(),
        "yearly totals by category"
    );
    by_category
}

/// Ranks primary countries by row count.
///
/// Excluded keys are dropped, ties keep first-encounter order, and at most
/// `limit` entries are returned. Year scoping is the caller's job: pass
/// [`FilteredRows::with_release_year`] for a single year.
#[must_use]
pub fn top_countries(
    rows: &FilteredRows<'_>,
    exclusions: &CountryExclusions,
    limit: usize,
) -> Vec<CountryCount> {
    let mut counts = IndexMap::<&str, usize>::new();
    for row in rows.iter() {
        *counts.entry(row.primary_country()).or_default() += 1;
    }

    let mut ranked: Vec<CountryCount> = counts
        .into_iter()
        .filter(|(country, _)| !exclusions.contains(country))
        .map(|(country, count)| CountryCount {
            country: country.to_owned(),
            count,
        })
        .collect();
    ranked.sort_by(|left, right| right.count.cmp(&left.count));
    ranked.truncate(limit);
    trace!(
        countries = ranked.len(),
        rows = rows.len(),
        limit,
        "top countries"
    );
    ranked
}
