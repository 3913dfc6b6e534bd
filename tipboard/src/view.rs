//! The derived, read-only view of the dataset.

use std::ops::Deref;

use crate::data::{Dataset, Record};
use crate::filter::FilterState;

/// Ordered subset of the dataset matching all active filters.
///
/// Derived lazily by [`crate::Dashboard::filtered_view`] and shared via
/// `Arc`; never mutated after construction. Carries the generation it was
/// derived at so the store can detect staleness.
#[derive(Debug)]
pub struct FilteredView {
    records: Vec<Record>,
    generation: u64,
}

impl FilteredView {
    pub(crate) fn derive(dataset: &Dataset, filter: &FilterState, generation: u64) -> Self {
        let records = dataset
            .records()
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        Self {
            records,
            generation,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Generation of the store state this view was derived from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Deref for FilteredView {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}
