use core::convert::Infallible;
use core::fmt;

use portfolio_pager::{Batch, FilterContext, FilterEpoch, Pager, PagerStatistics};

/// Where a [`crate::ScrollController`] gets its batches from.
///
/// [`Pager`] is the in-memory implementation. Sources backed by a network or a cache implement
/// this with a real error type; the controller turns every error into its `Error` state.
pub trait BatchSource {
    type Error: fmt::Display;

    fn next_batch(&mut self) -> Result<Batch, Self::Error>;

    /// Replaces the filter context and returns its initial batch.
    ///
    /// Must bump [`BatchSource::epoch`].
    fn apply_filter(&mut self, filter: FilterContext) -> Result<Batch, Self::Error>;

    fn epoch(&self) -> FilterEpoch;

    fn filter(&self) -> &FilterContext;

    fn filtered_len(&self) -> usize;

    fn statistics(&self) -> PagerStatistics;
}

impl BatchSource for Pager {
    type Error = Infallible;

    fn next_batch(&mut self) -> Result<Batch, Self::Error> {
        Ok(Pager::next_batch(self))
    }

    fn apply_filter(&mut self, filter: FilterContext) -> Result<Batch, Self::Error> {
        Ok(Pager::apply_filter(self, filter))
    }

    fn epoch(&self) -> FilterEpoch {
        Pager::epoch(self)
    }

    fn filter(&self) -> &FilterContext {
        Pager::filter(self)
    }

    fn filtered_len(&self) -> usize {
        Pager::filtered_len(self)
    }

    fn statistics(&self) -> PagerStatistics {
        Pager::statistics(self)
    }
}
