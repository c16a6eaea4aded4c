//! Search module.
//!
//! Filter criteria, sort keys and name collation used by the catalog query
//! engine.

mod collate;
mod criteria;
mod sort;

pub use collate::compare_names;
pub use criteria::FilterCriteria;
pub use sort::{ParseSortKeyError, SortKey};
