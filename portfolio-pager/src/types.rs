use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::PagerError;

/// Stable identity of a project. Valid ids are positive.
pub type ProjectId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Nonprofit,
    Business,
    Education,
    Tech,
    Health,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Nonprofit,
        Category::Business,
        Category::Education,
        Category::Tech,
        Category::Health,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nonprofit => "nonprofit",
            Self::Business => "business",
            Self::Education => "education",
            Self::Tech => "tech",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PagerError::UnknownCategory {
                value: String::from(s),
            })
    }
}

/// The category half of a filter context.
///
/// Tags are matched exactly. A tag that is not a known [`Category`] is kept as `Unknown` and
/// selects nothing, rather than being silently widened to `All`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    Unknown(String),
}

impl CategoryFilter {
    pub fn parse(tag: &str) -> Self {
        if tag == "all" {
            return Self::All;
        }
        match tag.parse::<Category>() {
            Ok(category) => Self::Only(category),
            Err(_) => Self::Unknown(String::from(tag)),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => *c == category,
            Self::Unknown(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(c) => c.as_str(),
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

/// A single portfolio entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub category: Category,
    pub subcategory: String,
    /// Human readable category label (e.g. "Travel & Tourism").
    pub display_category: String,
    pub image: String,
    pub url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub featured: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: u32,
    /// Case study content for the project's detail page, when it has one.
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "detailData", skip_serializing_if = "Option::is_none")
    )]
    pub detail: Option<ProjectDetail>,
}

/// Case study content shown on a project's detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ProjectDetail {
    pub tagline: String,
    pub client: String,
    pub industry: String,
    pub timeline: String,
    pub team_size: String,
    /// Client logo reference; empty when the page keeps its placeholder.
    pub logo: String,
    pub description: String,
    pub challenge: String,
    pub solution: String,
    pub results: Vec<String>,
}

impl ProjectDetail {
    /// The labelled facts shown in the detail page header, in display order.
    pub fn meta_items(&self) -> [(&'static str, &str); 4] {
        [
            ("Client", self.client.as_str()),
            ("Industry", self.industry.as_str()),
            ("Timeline", self.timeline.as_str()),
            ("Team Size", self.team_size.as_str()),
        ]
    }
}

/// Identifies one filter context instance.
///
/// Bumped on every filter application or reset, so two identical `(category, search)` pairs
/// applied one after another still get distinct epochs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterEpoch(pub u64);

impl FilterEpoch {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// One bounded, ordered slice of the filtered collection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Batch {
    /// Filter context the batch was produced under.
    pub epoch: FilterEpoch,
    /// Position of the first item within the filtered collection.
    pub offset: usize,
    pub items: Vec<Project>,
    /// Whether more items remain after this batch.
    pub has_more: bool,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn end(&self) -> usize {
        self.offset + self.items.len()
    }
}

/// How much of the current filtered collection has been delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coverage {
    /// The filter selects nothing at all.
    NoResults,
    /// Some items are still waiting to be delivered.
    Partial,
    /// Every item of a non-empty filtered collection has been delivered.
    Exhausted,
}
