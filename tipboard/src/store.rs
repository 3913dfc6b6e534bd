//! Filter state store with generation-stamped memoization.
//!
//! Every accepted mutation bumps an invalidation generation. The filtered
//! view is derived lazily on first read after a bump and cached against the
//! generation, so repeated reads between mutations return the identical
//! `Arc` and the filter pass runs at most once per generation.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::data::{Dataset, Day, Record, Sex};
use crate::errors::Result;
use crate::filter::{BillRange, FilterState};
use crate::view::FilteredView;

struct Inner {
    dataset: Arc<Dataset>,
    filter: FilterState,
    generation: u64,
    cache: Option<Arc<FilteredView>>,
}

/// Input state store and derivation engine for the dashboard.
///
/// The mutex serializes mutation and derivation, so generations stay
/// strictly ordered even when the embedding front-end delivers events from
/// more than one thread. Setters never recompute anything themselves.
pub struct Dashboard {
    inner: Mutex<Inner>,
}

impl Dashboard {
    /// Create a store over an already-validated dataset, with all filters
    /// inactive and the bill range spanning the dataset bounds.
    pub fn new(dataset: Dataset) -> Self {
        let filter = FilterState::for_bounds(dataset.bill_bounds());
        Self {
            inner: Mutex::new(Inner {
                dataset: Arc::new(dataset),
                filter,
                generation: 0,
                cache: None,
            }),
        }
    }

    /// Select a day, or `None` for all days. No-op when unchanged.
    pub fn set_day(&self, day: Option<Day>) {
        let mut inner = self.inner.lock();
        if inner.filter.day != day {
            inner.filter.day = day;
            inner.generation += 1;
        }
    }

    /// Include or exclude smoker rows. No-op when unchanged.
    pub fn set_smoker(&self, include: bool) {
        let mut inner = self.inner.lock();
        if inner.filter.include_smoker != include {
            inner.filter.include_smoker = include;
            inner.generation += 1;
        }
    }

    /// Set the inclusive total_bill interval.
    ///
    /// Fails with `InvalidInput` for non-finite bounds or `min > max`,
    /// leaving state and generation untouched.
    pub fn set_bill_range(&self, min: f64, max: f64) -> Result<()> {
        let range = BillRange::new(min, max)?;
        let mut inner = self.inner.lock();
        if inner.filter.bill_range != range {
            inner.filter.bill_range = range;
            inner.generation += 1;
        }
        Ok(())
    }

    /// Select a sex, or `None` for all. No-op when unchanged.
    pub fn set_sex(&self, sex: Option<Sex>) {
        let mut inner = self.inner.lock();
        if inner.filter.sex != sex {
            inner.filter.sex = sex;
            inner.generation += 1;
        }
    }

    /// Restore the load-time filter state for the current dataset.
    pub fn reset_filters(&self) {
        let mut inner = self.inner.lock();
        let fresh = FilterState::for_bounds(inner.dataset.bill_bounds());
        if inner.filter != fresh {
            inner.filter = fresh;
            inner.generation += 1;
        }
    }

    /// Replace the dataset wholesale.
    ///
    /// Fails with `EmptyDataset` (or `InvalidInput` for malformed rows)
    /// leaving the prior dataset and view intact. On success the bill range
    /// resets to the new dataset's bounds and the generation always bumps,
    /// even when the rows are identical, so a reload is observable.
    pub fn reload_dataset(&self, records: Vec<Record>) -> Result<()> {
        let dataset = Dataset::from_records(records)?;
        let mut inner = self.inner.lock();
        inner.filter.bill_range = BillRange {
            min: dataset.bill_bounds().0,
            max: dataset.bill_bounds().1,
        };
        inner.dataset = Arc::new(dataset);
        inner.generation += 1;
        Ok(())
    }

    /// The memoized filtered view.
    ///
    /// Recomputes only when the cached view's generation is stale; repeated
    /// reads without an intervening mutation return the same `Arc`. An
    /// empty view is a valid result, never an error.
    pub fn filtered_view(&self) -> Arc<FilteredView> {
        let mut inner = self.inner.lock();
        if let Some(cached) = &inner.cache {
            if cached.generation() == inner.generation {
                return Arc::clone(cached);
            }
        }
        let view = Arc::new(FilteredView::derive(
            &inner.dataset,
            &inner.filter,
            inner.generation,
        ));
        inner.cache = Some(Arc::clone(&view));
        view
    }

    /// Snapshot of the current filter criteria.
    pub fn filter_state(&self) -> FilterState {
        self.inner.lock().filter
    }

    /// Handle to the current dataset.
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.inner.lock().dataset)
    }

    /// Current invalidation generation.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }
}
