use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::{Category, FilterEpoch};

/// A lightweight, serializable snapshot of the pager's position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerState {
    pub category: String,
    pub search: String,
    pub epoch: FilterEpoch,
    pub loaded: usize,
    pub filtered: usize,
    pub has_more: bool,
}

/// Counts describing the catalog and the current filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerStatistics {
    pub total: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_subcategory: BTreeMap<String, usize>,
    pub loaded: usize,
    pub filtered: usize,
}
