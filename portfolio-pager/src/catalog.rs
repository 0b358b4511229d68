use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Category, CategoryFilter, PagerError, Project, ProjectDetail, ProjectId};

/// The full, ordered project list for a session.
///
/// Projects are kept sorted by their explicit `order` (ties keep input order). The list is
/// immutable and shared, so cloning a catalog is cheap.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    projects: Arc<[Project]>,
}

/// Previous/next projects around a given one, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a Project>,
    pub next: Option<&'a Project>,
}

impl Catalog {
    /// Builds a catalog, rejecting zero or duplicate ids.
    pub fn new(mut projects: Vec<Project>) -> Result<Self, PagerError> {
        let mut seen = BTreeSet::new();
        for (index, project) in projects.iter().enumerate() {
            if project.id == 0 {
                pwarn!(index, "Catalog::new: project id 0 rejected");
                return Err(PagerError::InvalidProjectId { index });
            }
            if !seen.insert(project.id) {
                pwarn!(id = project.id, "Catalog::new: duplicate project id rejected");
                return Err(PagerError::DuplicateProjectId { id: project.id });
            }
        }
        projects.sort_by_key(|p| p.order);
        pdebug!(count = projects.len(), "Catalog::new");
        Ok(Self {
            projects: projects.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn position(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    pub fn by_category<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| filter.matches(p.category))
    }

    pub fn featured(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    /// Returns the projects on either side of `id`, or `None` if `id` is unknown.
    pub fn neighbors(&self, id: ProjectId) -> Option<Neighbors<'_>> {
        let index = self.position(id)?;
        Some(Neighbors {
            previous: index.checked_sub(1).and_then(|i| self.projects.get(i)),
            next: self.projects.get(index + 1),
        })
    }

    /// Looks up a project together with its detail page content.
    pub fn detail(&self, id: ProjectId) -> Result<(&Project, &ProjectDetail), PagerError> {
        let project = self.get(id).ok_or(PagerError::ProjectNotFound { id })?;
        match project.detail.as_ref() {
            Some(detail) => Ok((project, detail)),
            None => {
                pwarn!(id, "Catalog::detail: project has no detail data");
                Err(PagerError::MissingDetail { id })
            }
        }
    }

    /// Resolves a detail page query string (`?id=7`) to its project and detail content.
    pub fn detail_for_query(
        &self,
        query: &str,
    ) -> Result<(&Project, &ProjectDetail), PagerError> {
        let id = project_id_from_query(query).ok_or(PagerError::MissingProjectId)?;
        self.detail(id)
    }

    pub fn count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for project in self.projects.iter() {
            *counts.entry(project.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_by_subcategory(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for project in self.projects.iter() {
            *counts.entry(project.subcategory.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Extracts a positive project id from the `id` parameter of a query string.
///
/// Accepts an optional leading `?`; other parameters are ignored.
pub fn project_id_from_query(query: &str) -> Option<ProjectId> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .and_then(|(_, value)| value.parse::<ProjectId>().ok())
        .filter(|id| *id > 0)
}

#[cfg(feature = "json")]
mod json {
    use alloc::vec::Vec;

    use super::Catalog;
    use crate::{CatalogMetadata, PagerError, PagerOptions, Project};

    #[derive(serde::Deserialize)]
    struct RawDocument {
        #[serde(default)]
        metadata: CatalogMetadata,
        projects: Vec<Project>,
    }

    /// A decoded dataset document: the catalog plus its pagination hints.
    #[derive(Clone, Debug)]
    pub struct CatalogDocument {
        pub catalog: Catalog,
        pub metadata: CatalogMetadata,
    }

    impl CatalogDocument {
        /// Default pager options overlaid with the document's metadata.
        pub fn pager_options(&self) -> PagerOptions {
            PagerOptions::default().from_metadata(&self.metadata)
        }
    }

    impl Catalog {
        /// Decodes a `{ "metadata": {..}, "projects": [..] }` document.
        pub fn from_json(input: &str) -> Result<CatalogDocument, PagerError> {
            let raw: RawDocument = serde_json::from_str(input)?;
            let catalog = Catalog::new(raw.projects)?;
            Ok(CatalogDocument {
                catalog,
                metadata: raw.metadata,
            })
        }
    }
}

#[cfg(feature = "json")]
pub use json::CatalogDocument;
