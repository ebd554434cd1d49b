//! Dual-bound numeric range over a stepped domain.
//!
//! Every operation returns a range satisfying
//! `domain_min <= low < high <= domain_max`. When bounds collide the upper
//! bound is preserved and the lower bound yields by up to one step, never
//! below the domain minimum. Only an upper bound on the floor itself moves,
//! to one step above it. Stepping moves keep a gap of at least one step
//! between the bounds.

use crate::error::EngineIssue;
use serde::{Deserialize, Serialize};

/// Selected price window, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSelector {
    domain_min: f64,
    domain_max: f64,
    step: f64,
}

impl RangeSelector {
    /// Build a selector; the domain is widened to at least one step
    pub fn new(domain_min: f64, domain_max: f64, step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
        let min = if domain_min.is_finite() { domain_min } else { 0.0 };
        let max = if domain_max.is_finite() { domain_max } else { min + step };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let max = if max - min < step { min + step } else { max };

        Self {
            domain_min: min,
            domain_max: max,
            step,
        }
    }

    /// Domain covering the given prices, rounded outward to the step
    pub fn covering(lowest: f64, highest: f64, step: f64) -> Self {
        let unit = Self::new(0.0, 0.0, step);
        let step = unit.step;
        let min = (lowest / step).floor() * step;
        let max = (highest / step).ceil() * step;
        Self::new(min, max, step)
    }

    pub fn domain_min(&self) -> f64 {
        self.domain_min
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The whole domain, used as the default selection
    pub fn full(&self) -> PriceRange {
        PriceRange::new(self.domain_min, self.domain_max)
    }

    pub fn is_full(&self, range: &PriceRange) -> bool {
        *range == self.full()
    }

    /// Constrain a value into the domain; NaN goes to the domain minimum
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.domain_min
        } else {
            value.clamp(self.domain_min, self.domain_max)
        }
    }

    /// Clamp both bounds and resolve a collision in favour of the upper bound
    pub fn set_range(&self, new_low: f64, new_high: f64) -> PriceRange {
        let mut low = self.clamp(new_low);
        let mut high = self.clamp(new_high);

        if low >= high {
            if high > self.domain_min {
                low = (high - self.step).max(self.domain_min);
            } else {
                // upper bound sits on the floor; the only valid window is the first step
                low = self.domain_min;
                high = self.domain_min + self.step;
            }
        }

        let corrected = PriceRange::new(low, high);
        if corrected.low != new_low || corrected.high != new_high {
            let issue = EngineIssue::InvalidRange {
                low: new_low,
                high: new_high,
                corrected_low: corrected.low,
                corrected_high: corrected.high,
            };
            tracing::debug!(%issue, "price range corrected");
        }
        corrected
    }

    /// Revalidate a range, e.g. one stored before the domain changed
    pub fn normalize(&self, range: PriceRange) -> PriceRange {
        self.set_range(range.low, range.high)
    }

    pub fn increment_low(&self, range: PriceRange) -> PriceRange {
        let range = self.normalize(range);
        let ceiling = (range.high - self.step).max(range.low);
        PriceRange::new((range.low + self.step).min(ceiling), range.high)
    }

    pub fn decrement_low(&self, range: PriceRange) -> PriceRange {
        let range = self.normalize(range);
        PriceRange::new((range.low - self.step).max(self.domain_min), range.high)
    }

    pub fn increment_high(&self, range: PriceRange) -> PriceRange {
        let range = self.normalize(range);
        PriceRange::new(range.low, (range.high + self.step).min(self.domain_max))
    }

    pub fn decrement_high(&self, range: PriceRange) -> PriceRange {
        let range = self.normalize(range);
        let floor = (range.low + self.step).min(range.high);
        PriceRange::new(range.low, (range.high - self.step).max(floor))
    }
}
