//! Dataset rows and wholesale dataset loading.
//!
//! Rows are immutable once loaded. A dataset is only ever replaced as a
//! whole, never edited in place, so views derived from it can be shared
//! freely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Days of the week covered by the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Thur,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// Canonical ordering used for all grouped output.
    pub const CANONICAL: [Day; 4] = [Day::Thur, Day::Fri, Day::Sat, Day::Sun];
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Thur => "Thur",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        };
        f.pad(name)
    }
}

impl FromStr for Day {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "thur" | "thu" | "thursday" => Ok(Day::Thur),
            "fri" | "friday" => Ok(Day::Fri),
            "sat" | "saturday" => Ok(Day::Sat),
            "sun" | "sunday" => Ok(Day::Sun),
            _ => Err(Error::InvalidInput(format!(
                "unknown day '{s}' (expected Thur, Fri, Sat or Sun)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        })
    }
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(Error::InvalidInput(format!(
                "unknown sex '{s}' (expected Male or Female)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Smoker {
    Yes,
    No,
}

impl fmt::Display for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Smoker::Yes => "Yes",
            Smoker::No => "No",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mealtime {
    Lunch,
    Dinner,
}

impl fmt::Display for Mealtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Mealtime::Lunch => "Lunch",
            Mealtime::Dinner => "Dinner",
        })
    }
}

/// One row of the tips dataset.
///
/// A row that is missing a field, carries an extra field, or holds an
/// out-of-domain value fails deserialization; the load is rejected rather
/// than silently defaulted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub total_bill: f64,
    pub tip: f64,
    pub sex: Sex,
    pub smoker: Smoker,
    pub day: Day,
    pub time: Mealtime,
    pub size: u32,
}

const SAMPLE_JSON: &str = include_str!("../data/tips.json");

/// An ordered, non-empty collection of records.
#[derive(Clone, Debug)]
pub struct Dataset {
    records: Vec<Record>,
    bill_bounds: (f64, f64),
}

impl Dataset {
    /// Build a dataset from already-parsed rows.
    ///
    /// Rejects an empty row set and rows with non-finite amounts; the
    /// total_bill bounds are captured here for the initial bill-range
    /// filter.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, record) in records.iter().enumerate() {
            if !record.total_bill.is_finite() || !record.tip.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "row {index}: non-finite bill or tip amount"
                )));
            }
            min = min.min(record.total_bill);
            max = max.max(record.total_bill);
        }

        Ok(Self {
            records,
            bill_bounds: (min, max),
        })
    }

    /// Parse a dataset from its row-oriented JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("malformed dataset: {e}")))?;
        Self::from_records(records)
    }

    /// The bundled sample dataset, available without any external file.
    pub fn sample() -> Self {
        Self::from_json(SAMPLE_JSON).expect("bundled sample dataset is valid")
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Minimum and maximum total_bill observed at load time.
    pub fn bill_bounds(&self) -> (f64, f64) {
        self.bill_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(json: &str) -> Result<Record> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    #[test]
    fn sample_dataset_loads() {
        let dataset = Dataset::sample();
        assert!(!dataset.is_empty());
        let (min, max) = dataset.bill_bounds();
        assert!(min <= max);
        assert!(dataset.records().iter().all(|r| r.total_bill >= min && r.total_bill <= max));
    }

    #[test]
    fn row_with_unknown_field_is_rejected() {
        let result = row(
            r#"{ "total_bill": 10.0, "tip": 2.0, "sex": "Male", "smoker": "No",
                 "day": "Sun", "time": "Dinner", "size": 2, "waiter": "Sam" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn row_with_missing_field_is_rejected() {
        let result = row(
            r#"{ "total_bill": 10.0, "sex": "Male", "smoker": "No",
                 "day": "Sun", "time": "Dinner", "size": 2 }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn row_with_out_of_domain_day_is_rejected() {
        let result = row(
            r#"{ "total_bill": 10.0, "tip": 2.0, "sex": "Male", "smoker": "No",
                 "day": "Mon", "time": "Dinner", "size": 2 }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = Dataset::from_records(Vec::new()).expect_err("empty rows should fail");
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        let record = Record {
            total_bill: f64::NAN,
            tip: 1.0,
            sex: Sex::Male,
            smoker: Smoker::No,
            day: Day::Sun,
            time: Mealtime::Dinner,
            size: 2,
        };
        let err = Dataset::from_records(vec![record]).expect_err("NaN bill should fail");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn day_parses_case_insensitively() {
        assert_eq!("SAT".parse::<Day>().unwrap(), Day::Sat);
        assert_eq!("thursday".parse::<Day>().unwrap(), Day::Thur);
        assert!("monday".parse::<Day>().is_err());
    }

    #[test]
    fn sex_parses_short_forms() {
        assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }
}
