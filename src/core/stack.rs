use serde::{Deserialize, Serialize};

use crate::core::aggregation::YearlyCategoryCount;
use crate::core::types::ContentType;

/// One layer of one stacked bar: `[base, top)` in count units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSegment {
    pub year: i32,
    pub base: usize,
    pub top: usize,
}

impl StackSegment {
    #[must_use]
    pub fn height(self) -> usize {
        self.top - self.base
    }
}

/// All segments of one category, in year order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedSeries {
    pub category: ContentType,
    pub segments: Vec<StackSegment>,
}

/// Converts per-year category counts into cumulative offsets.
///
/// Series follow [`ContentType::ALL`] order, so movies sit at the bottom of
/// each bar and the last series' `top` equals the year's total.
#[must_use]
pub fn stack_by_category(counts: &[YearlyCategoryCount]) -> Vec<StackedSeries> {
    let mut series: Vec<StackedSeries> = ContentType::ALL
        .into_iter()
        .map(|category| StackedSeries {
            category,
            segments: Vec::with_capacity(counts.len()),
        })
        .collect();

    for entry in counts {
        let mut base = 0;
        for layer in &mut series {
            let top = base + entry.count(layer.category);
            layer.segments.push(StackSegment {
                year: entry.year,
                base,
                top,
            });
            base = top;
        }
    }

    series
}
