pub mod aggregation;
pub mod loader;
pub mod scale;
pub mod stack;
pub mod types;

pub use aggregation::{
    CountryCount, CountryExclusions, DEFAULT_TOP_COUNTRY_LIMIT, DOMINANT_COUNTRY,
    YearlyCategoryCount, YearlyCount, top_countries, yearly_by_category, yearly_totals,
};
pub use loader::{load_dataset, load_dataset_from_reader};
pub use scale::{BandDomain, ChartDomains, DEFAULT_NICE_TICKS, ValueDomain};
pub use stack::{StackSegment, StackedSeries, stack_by_category};
pub use types::{ContentType, Dataset, FilteredRows, Row, YearWindow, coerce_release_year};
