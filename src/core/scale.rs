use serde::{Deserialize, Serialize};

/// Tick count used when rounding a value domain outward.
pub const DEFAULT_NICE_TICKS: u32 = 10;

/// Linear value domain of a bar chart, always anchored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    domain_start: f64,
    domain_end: f64,
}

impl ValueDomain {
    /// `[0, max]`, falling back to `[0, 1]` when `max` is zero so an empty
    /// view still has a drawable axis.
    #[must_use]
    pub fn from_max_count(max: usize) -> Self {
        Self {
            domain_start: 0.0,
            domain_end: if max == 0 { 1.0 } else { max as f64 },
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Extends both ends outward to round tick steps.
    #[must_use]
    pub fn nice(self, ticks: u32) -> Self {
        let (mut start, mut stop) = (self.domain_start, self.domain_end);
        let mut previous_step = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, ticks);
            if previous_step == Some(step) || step == 0.0 || !step.is_finite() {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous_step = Some(step);
        }

        Self {
            domain_start: start,
            domain_end: stop,
        }
    }
}

/// Signed tick step: positive steps are whole multiples of a power of ten,
/// negative steps encode the reciprocal of a sub-unit step.
fn tick_increment(start: f64, stop: f64, count: u32) -> f64 {
    let step = (stop - start) / f64::from(count.max(1));
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Ordinal band domain: one label per bar, in view order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandDomain {
    labels: Vec<String>,
}

impl BandDomain {
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Scale domains handed to the chart-drawing collaborator with each view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDomains {
    pub bands: BandDomain,
    pub values: ValueDomain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_rounds_up_to_tick_multiple() {
        let domain = ValueDomain::from_max_count(937).nice(DEFAULT_NICE_TICKS);
        assert_eq!(domain.domain(), (0.0, 1000.0));

        let domain = ValueDomain::from_max_count(1870).nice(DEFAULT_NICE_TICKS);
        assert_eq!(domain.domain(), (0.0, 2000.0));
    }

    #[test]
    fn nice_keeps_small_round_domains() {
        assert_eq!(
            ValueDomain::from_max_count(1).nice(DEFAULT_NICE_TICKS).domain(),
            (0.0, 1.0)
        );
        assert_eq!(
            ValueDomain::from_max_count(50).nice(DEFAULT_NICE_TICKS).domain(),
            (0.0, 50.0)
        );
    }

    #[test]
    fn empty_view_falls_back_to_unit_domain() {
        assert_eq!(ValueDomain::from_max_count(0).domain(), (0.0, 1.0));
    }
}
