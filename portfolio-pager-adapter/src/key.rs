use portfolio_pager::ProjectId;

#[cfg(feature = "std")]
pub(crate) type RenderedIds = std::collections::HashSet<ProjectId>;
#[cfg(not(feature = "std"))]
pub(crate) type RenderedIds = alloc::collections::BTreeSet<ProjectId>;
