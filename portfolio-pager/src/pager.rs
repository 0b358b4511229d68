use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    Batch, Catalog, Coverage, FilterContext, FilterEpoch, PagerError, PagerOptions, PagerState,
    PagerStatistics, Project,
};

/// A deterministic, filterable pagination source.
///
/// This type is UI-agnostic:
/// - It owns the catalog, the current filter context, and the pagination cursor.
/// - It produces ordered batches on demand; it never decides *when* to load.
///
/// The delivered items are always a prefix of the filtered collection. The pager only stores the
/// prefix length, so that invariant cannot be broken by any sequence of calls.
///
/// Calls are not single-flight guarded here. Callers that issue loads asynchronously should use
/// the controller in `portfolio-pager-adapter`, which owns that guard.
#[derive(Clone, Debug)]
pub struct Pager {
    catalog: Catalog,
    options: PagerOptions,
    filter: FilterContext,
    epoch: FilterEpoch,
    filtered: Vec<usize>, // indexes into `catalog`, catalog order
    loaded: usize,
}

impl Pager {
    /// Creates a pager over the whole catalog with nothing loaded yet.
    pub fn new(catalog: Catalog, options: PagerOptions) -> Result<Self, PagerError> {
        options.validate()?;
        pdebug!(
            count = catalog.len(),
            initial_load = options.initial_load,
            per_load = options.per_load,
            "Pager::new"
        );
        let filtered = (0..catalog.len()).collect();
        Ok(Self {
            catalog,
            options,
            filter: FilterContext::all(),
            epoch: FilterEpoch::default(),
            filtered,
            loaded: 0,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    pub fn filter(&self) -> &FilterContext {
        &self.filter
    }

    pub fn epoch(&self) -> FilterEpoch {
        self.epoch
    }

    pub fn loaded_len(&self) -> usize {
        self.loaded
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn has_more(&self) -> bool {
        self.loaded < self.filtered.len()
    }

    pub fn coverage(&self) -> Coverage {
        if self.filtered.is_empty() {
            Coverage::NoResults
        } else if self.has_more() {
            Coverage::Partial
        } else {
            Coverage::Exhausted
        }
    }

    /// Projects delivered so far under the current filter, in delivery order.
    pub fn loaded(&self) -> impl Iterator<Item = &Project> {
        self.project_range(0, self.loaded)
    }

    /// Every project selected by the current filter, in catalog order.
    pub fn filtered(&self) -> impl Iterator<Item = &Project> {
        self.project_range(0, self.filtered.len())
    }

    fn project_range(&self, start: usize, end: usize) -> impl Iterator<Item = &Project> {
        let projects = self.catalog.projects();
        self.filtered[start..end].iter().map(move |&i| &projects[i])
    }

    fn batch(&self, start: usize, end: usize) -> Batch {
        Batch {
            epoch: self.epoch,
            offset: start,
            items: self.project_range(start, end).cloned().collect(),
            has_more: self.has_more(),
        }
    }

    /// Delivers the first `initial_load` items, replacing whatever was loaded before.
    pub fn initial_batch(&mut self) -> Batch {
        self.loaded = self.options.initial_load.min(self.filtered.len());
        ptrace!(
            loaded = self.loaded,
            filtered = self.filtered.len(),
            "Pager::initial_batch"
        );
        self.batch(0, self.loaded)
    }

    /// Delivers up to `per_load` items following the loaded prefix.
    ///
    /// Returns an empty batch once everything has been delivered.
    pub fn next_batch(&mut self) -> Batch {
        let start = self.loaded;
        let end = start
            .saturating_add(self.options.per_load)
            .min(self.filtered.len());
        if start >= end {
            ptrace!(start, "Pager::next_batch: end of content");
            return self.batch(start, start);
        }
        self.loaded = end;
        ptrace!(start, end, has_more = self.has_more(), "Pager::next_batch");
        self.batch(start, end)
    }

    /// Replaces the filter context and re-delivers the initial batch.
    pub fn apply_filter(&mut self, filter: FilterContext) -> Batch {
        let projects = self.catalog.projects();
        self.filtered = (0..projects.len())
            .filter(|&i| filter.matches(&projects[i]))
            .collect();
        self.filter = filter;
        self.epoch = self.epoch.next();
        self.loaded = 0;
        pdebug!(
            category = self.filter.category().as_str(),
            search = self.filter.search(),
            filtered = self.filtered.len(),
            epoch = self.epoch.0,
            "Pager::apply_filter"
        );
        self.initial_batch()
    }

    /// Returns to the unfiltered context with nothing loaded.
    pub fn reset(&mut self) {
        self.filter = FilterContext::all();
        self.filtered = (0..self.catalog.len()).collect();
        self.epoch = self.epoch.next();
        self.loaded = 0;
    }

    pub fn statistics(&self) -> PagerStatistics {
        PagerStatistics {
            total: self.catalog.len(),
            by_category: self.catalog.count_by_category(),
            by_subcategory: self.catalog.count_by_subcategory(),
            loaded: self.loaded,
            filtered: self.filtered.len(),
        }
    }

    pub fn snapshot(&self) -> PagerState {
        PagerState {
            category: String::from(self.filter.category().as_str()),
            search: String::from(self.filter.search()),
            epoch: self.epoch,
            loaded: self.loaded,
            filtered: self.filtered.len(),
            has_more: self.has_more(),
        }
    }
}
