//! Tipboard - the filtering and derivation core of a tips dashboard.
//!
//! This crate holds the dataset and the user's filter criteria and derives
//! a filtered view plus summary statistics from them. Input widgets,
//! tables, and charts are external consumers; they call the setters on
//! [`Dashboard`] and read [`Dashboard::filtered_view`] and the functions in
//! [`stats`].
//!
//! # Invalidation
//!
//! Every accepted mutation bumps a generation counter. The filtered view is
//! derived at most once per generation, on first read, and repeated reads
//! return the identical `Arc` until the next mutation. Rejected mutations
//! (`InvalidInput`, `EmptyDataset`) leave both the state and the generation
//! untouched.

pub mod config;
pub mod data;
pub mod errors;
pub mod filter;
pub mod stats;
pub mod store;
pub mod view;

pub use config::Config;
pub use data::{Dataset, Day, Mealtime, Record, Sex, Smoker};
pub use errors::{Error, Result};
pub use filter::{parse_day_choice, parse_sex_choice, BillRange, FilterState};
pub use store::Dashboard;
pub use view::FilteredView;
