use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// Content category of one catalog record.
///
/// Variant order is the stack order used by the stacked view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    /// Literal label used by the source data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::TvShow => "TV Show",
        }
    }

    /// Matches a source label exactly. Unknown labels yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One content record.
///
/// `release_year` is `None` when the source value is not an integral number;
/// `content_type` is `None` when the label is not a known category. Both
/// cases are excluded by [`YearWindow`] filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub release_year: Option<i32>,
    pub content_type: Option<ContentType>,
    pub country: String,
}

impl Row {
    #[must_use]
    pub fn new(release_year: i32, content_type: ContentType, country: impl Into<String>) -> Self {
        Self {
            release_year: Some(release_year),
            content_type: Some(content_type),
            country: country.into(),
        }
    }

    /// Text before the first comma of `country`, trimmed.
    #[must_use]
    pub fn primary_country(&self) -> &str {
        self.country.split(',').next().unwrap_or_default().trim()
    }
}

/// Coerces a raw year cell. Whitespace is ignored and integral floats such as
/// `"2016.0"` are accepted; anything else is the invalid sentinel.
#[must_use]
pub fn coerce_release_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// Open interval of release years considered for aggregation.
///
/// Both bounds are exclusive: the default window `(2000, 2022)` keeps
/// 2001 through 2021.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub after: i32,
    pub before: i32,
}

impl Default for YearWindow {
    fn default() -> Self {
        Self {
            after: 2000,
            before: 2022,
        }
    }
}

impl YearWindow {
    pub fn exclusive(after: i32, before: i32) -> StoryResult<Self> {
        let window = Self { after, before };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(self) -> StoryResult<()> {
        if i64::from(self.before) - i64::from(self.after) < 2 {
            return Err(StoryError::InvalidConfig(format!(
                "year window ({}, {}) contains no year",
                self.after, self.before
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(self, year: i32) -> bool {
        year > self.after && year < self.before
    }

    /// First and last included year.
    #[must_use]
    pub fn inclusive_bounds(self) -> (i32, i32) {
        (self.after + 1, self.before - 1)
    }

    /// Human label of the included range, e.g. `2001-2021`.
    #[must_use]
    pub fn label(self) -> String {
        let (first, last) = self.inclusive_bounds();
        format!("{first}-{last}")
    }

    /// Whether a row takes part in aggregation at all.
    #[must_use]
    pub fn admits(self, row: &Row) -> bool {
        row.content_type.is_some() && row.release_year.is_some_and(|year| self.contains(year))
    }
}

/// Immutable sequence of loaded rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies the year window once; aggregations consume the result.
    #[must_use]
    pub fn filtered(&self, window: YearWindow) -> FilteredRows<'_> {
        FilteredRows::from_rows(&self.rows, window)
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Rows that passed the year-window filter, borrowed from a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRows<'a> {
    window: YearWindow,
    rows: Vec<&'a Row>,
}

impl<'a> FilteredRows<'a> {
    #[must_use]
    pub fn from_rows(rows: &'a [Row], window: YearWindow) -> Self {
        Self {
            window,
            rows: rows.iter().filter(|row| window.admits(row)).collect(),
        }
    }

    #[must_use]
    pub fn window(&self) -> YearWindow {
        self.window
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.rows.iter().copied()
    }

    /// Narrows to rows released in exactly `year`.
    #[must_use]
    pub fn with_release_year(&self, year: i32) -> Self {
        Self {
            window: self.window,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|row| row.release_year == Some(year))
                .collect(),
        }
    }
}
