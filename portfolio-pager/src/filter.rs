use alloc::string::String;

use crate::{CategoryFilter, Project};

/// The `(category, search term)` pair that selects a subsequence of the catalog.
///
/// The search term is kept as given and lowercased once for matching. It is tested as a
/// substring of the project title and of its display category label.
///
/// With `feature = "serde"`, only the category and the search term are serialized; the
/// lowercased matcher is rebuilt on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "FilterFields", into = "FilterFields"))]
pub struct FilterContext {
    category: CategoryFilter,
    search: String,
    needle: String,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct FilterFields {
    #[serde(default)]
    category: CategoryFilter,
    #[serde(default)]
    search: String,
}

#[cfg(feature = "serde")]
impl From<FilterFields> for FilterContext {
    fn from(fields: FilterFields) -> Self {
        Self::new(fields.category, fields.search)
    }
}

#[cfg(feature = "serde")]
impl From<FilterContext> for FilterFields {
    fn from(filter: FilterContext) -> Self {
        Self {
            category: filter.category,
            search: filter.search,
        }
    }
}

impl FilterContext {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        let search = search.into();
        let needle = search.to_lowercase();
        Self {
            category,
            search,
            needle,
        }
    }

    /// Builds a context from the raw strings carried by filter events.
    pub fn parse(category: &str, search: &str) -> Self {
        Self::new(CategoryFilter::parse(category), search)
    }

    /// The context that matches every project.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(self, category: CategoryFilter) -> Self {
        Self {
            category,
            ..self
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self::new(self.category, search)
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.needle.is_empty()
    }

    pub fn matches(&self, project: &Project) -> bool {
        if !self.category.matches(project.category) {
            return false;
        }
        if self.needle.is_empty() {
            return true;
        }
        project.title.to_lowercase().contains(&self.needle)
            || project.display_category.to_lowercase().contains(&self.needle)
    }
}
