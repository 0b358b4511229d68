//! A headless pagination source for infinite-scroll project galleries.
//!
//! For the scroll controller, viewport intersection math, and filter events, see the
//! `portfolio-pager-adapter` crate.
//!
//! This crate owns the data side of an infinite-scroll gallery: an immutable project catalog,
//! a `(category, search)` filter predicate, and a pagination cursor that hands out ordered
//! batches on demand.
//!
//! It is UI-agnostic. A browser/TUI/GUI layer is expected to decide:
//! - when to ask for the next batch (usually when a sentinel scrolls into view)
//! - how to mount the returned items
//! - when the filter changes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

pub mod card;
mod catalog;
mod error;
mod filter;
mod options;
mod pager;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, Neighbors, project_id_from_query};
#[cfg(feature = "json")]
pub use catalog::CatalogDocument;
pub use error::PagerError;
pub use filter::FilterContext;
pub use options::{CatalogMetadata, PagerOptions};
pub use pager::Pager;
pub use state::{PagerState, PagerStatistics};
pub use types::{
    Batch, Category, CategoryFilter, Coverage, FilterEpoch, Project, ProjectDetail, ProjectId,
};
