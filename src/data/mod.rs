//! Data module - listing model, CSV loading and filtering

mod filter;
mod loader;
mod model;

pub use filter::{apply_filters, filter_by_neighbourhoods, filter_by_room_type};
pub use loader::load_shared;
pub use model::{Dataset, FilterCriteria, FilterResult, Listing};

#[cfg(test)]
pub(crate) use filter::tests::{listing, sample_dataset};
