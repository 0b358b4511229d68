use crate::PagerError;

/// Configuration for [`crate::Pager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerOptions {
    /// Number of items delivered by `initial_batch`.
    pub initial_load: usize,
    /// Number of items delivered by each `next_batch`.
    pub per_load: usize,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            initial_load: 12,
            per_load: 8,
        }
    }
}

impl PagerOptions {
    pub fn new(initial_load: usize, per_load: usize) -> Self {
        Self {
            initial_load,
            per_load,
        }
    }

    pub fn with_initial_load(mut self, initial_load: usize) -> Self {
        self.initial_load = initial_load;
        self
    }

    pub fn with_per_load(mut self, per_load: usize) -> Self {
        self.per_load = per_load;
        self
    }

    /// Overlays the sizes a dataset document declares in its metadata.
    ///
    /// Missing fields keep the values already set on `self`.
    pub fn from_metadata(mut self, metadata: &CatalogMetadata) -> Self {
        if let Some(initial_load) = metadata.initial_load {
            self.initial_load = initial_load;
        }
        if let Some(per_load) = metadata.items_per_load {
            self.per_load = per_load;
        }
        self
    }

    pub fn validate(&self) -> Result<(), PagerError> {
        if self.initial_load == 0 {
            return Err(PagerError::InvalidOptions {
                field: "initial_load",
                reason: "must be greater than zero",
            });
        }
        if self.per_load == 0 {
            return Err(PagerError::InvalidOptions {
                field: "per_load",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

/// Pagination hints carried by a dataset document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CatalogMetadata {
    pub initial_load: Option<usize>,
    pub items_per_load: Option<usize>,
}
