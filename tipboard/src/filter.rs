//! Filter criteria and the row predicate.

use crate::data::{Day, Record, Sex, Smoker};
use crate::errors::{Error, Result};

/// Inclusive total_bill interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BillRange {
    pub min: f64,
    pub max: f64,
}

impl BillRange {
    /// Validated construction: both bounds finite, `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidInput(format!(
                "bill range bounds must be finite, got {min}..{max}"
            )));
        }
        if min > max {
            return Err(Error::InvalidInput(format!(
                "bill range minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, bill: f64) -> bool {
        bill >= self.min && bill <= self.max
    }
}

/// Current user-selected filter criteria.
///
/// `None` for day or sex means the filter is inactive ("All" in the UI).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterState {
    pub day: Option<Day>,
    pub include_smoker: bool,
    pub bill_range: BillRange,
    pub sex: Option<Sex>,
}

impl FilterState {
    /// Load-time filter state: everything selected, bill range spanning the
    /// dataset's observed bounds.
    pub fn for_bounds(bounds: (f64, f64)) -> Self {
        Self {
            day: None,
            include_smoker: true,
            bill_range: BillRange {
                min: bounds.0,
                max: bounds.1,
            },
            sex: None,
        }
    }

    /// True when the record passes every active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        if self.day.is_some_and(|day| record.day != day) {
            return false;
        }
        if !self.include_smoker && record.smoker == Smoker::Yes {
            return false;
        }
        if !self.bill_range.contains(record.total_bill) {
            return false;
        }
        if self.sex.is_some_and(|sex| record.sex != sex) {
            return false;
        }
        true
    }
}

/// Parse a day selection, where "all" clears the filter.
pub fn parse_day_choice(s: &str) -> Result<Option<Day>> {
    if s.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Parse a sex selection, where "all" clears the filter.
pub fn parse_sex_choice(s: &str) -> Result<Option<Sex>> {
    if s.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}
