use alloc::string::String;
use alloc::vec::Vec;

use portfolio_pager::card::render_card;
use portfolio_pager::{Project, ProjectId};

/// The status region shown next to the item list. Exactly one is visible at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Panel {
    #[default]
    Hidden,
    Loading,
    Skeleton,
    /// Error panel with a retry affordance.
    Error,
    EndOfContent,
    /// The current filter selects nothing.
    NoResults,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("project {id} cannot be rendered: {reason}")]
    MalformedRecord { id: ProjectId, reason: &'static str },

    #[error("mount point unavailable: {0}")]
    Unavailable(String),
}

/// The mount point a [`crate::ScrollController`] renders into.
///
/// Implementations wrap whatever the UI provides: a DOM container plus sentinel, status panels,
/// and a live region; or a TUI list; or an in-memory buffer such as [`MarkupView`].
pub trait GalleryView {
    /// Removes every rendered item. Only called on a full reset.
    fn clear_items(&mut self);

    /// Appends items after the ones already rendered, in the given order.
    ///
    /// Must be all-or-nothing: on `Err`, no item of `items` may stay mounted.
    fn append_items(&mut self, items: &[Project]) -> Result<(), RenderError>;

    fn show_panel(&mut self, panel: Panel);

    /// Fills the skeleton region. Views without one can ignore it.
    fn set_skeleton(&mut self, _markup: &str) {}

    /// Starts or stops observing the scroll sentinel.
    fn set_trigger_observed(&mut self, observed: bool);

    /// Writes the live region text. An empty string clears it.
    fn set_live_text(&mut self, text: &str);
}

/// An in-memory view that renders cards to markup strings.
///
/// Useful for server-side rendering, snapshots, and tests.
#[derive(Clone, Debug, Default)]
pub struct MarkupView {
    cards: Vec<(ProjectId, String)>,
    skeleton: String,
    panel: Panel,
    trigger_observed: bool,
    live_text: String,
    announcements: Vec<String>,
}

impl MarkupView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ProjectId> + '_ {
        self.cards.iter().map(|(id, _)| *id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|(_, html)| html.as_str())
    }

    /// All cards concatenated, in mount order.
    pub fn markup(&self) -> String {
        self.cards().collect()
    }

    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn is_trigger_observed(&self) -> bool {
        self.trigger_observed
    }

    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    /// Every non-empty live region text written so far, oldest first.
    pub fn announcements(&self) -> &[String] {
        &self.announcements
    }

    fn validate(project: &Project) -> Result<(), RenderError> {
        let reason = if project.title.trim().is_empty() {
            "empty title"
        } else if project.url.trim().is_empty() {
            "empty url"
        } else {
            return Ok(());
        };
        Err(RenderError::MalformedRecord {
            id: project.id,
            reason,
        })
    }
}

impl GalleryView for MarkupView {
    fn clear_items(&mut self) {
        self.cards.clear();
    }

    fn append_items(&mut self, items: &[Project]) -> Result<(), RenderError> {
        items.iter().try_for_each(Self::validate)?;
        self.cards
            .extend(items.iter().map(|p| (p.id, render_card(p))));
        Ok(())
    }

    fn show_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    fn set_skeleton(&mut self, markup: &str) {
        self.skeleton.clear();
        self.skeleton.push_str(markup);
    }

    fn set_trigger_observed(&mut self, observed: bool) {
        self.trigger_observed = observed;
    }

    fn set_live_text(&mut self, text: &str) {
        self.live_text.clear();
        self.live_text.push_str(text);
        if !text.is_empty() {
            self.announcements.push(String::from(text));
        }
    }
}
