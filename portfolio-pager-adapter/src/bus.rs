use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use portfolio_pager::FilterContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterEventKind {
    /// A category button (and possibly the search box) changed.
    Filtered,
    /// Only the search box changed; the current category stays in effect.
    Searched,
}

/// A filter or search change published by the page's filter controls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FilterEvent {
    pub kind: FilterEventKind,
    pub category: String,
    pub search_term: String,
}

impl FilterEvent {
    pub fn filtered(category: impl Into<String>, search_term: impl Into<String>) -> Self {
        Self {
            kind: FilterEventKind::Filtered,
            category: category.into(),
            search_term: search_term.into(),
        }
    }

    pub fn searched(search_term: impl Into<String>) -> Self {
        Self {
            kind: FilterEventKind::Searched,
            category: String::new(),
            search_term: search_term.into(),
        }
    }

    /// Resolves the event against the context currently in effect.
    pub fn resolve(&self, current: &FilterContext) -> FilterContext {
        match self.kind {
            FilterEventKind::Filtered => FilterContext::parse(&self.category, &self.search_term),
            FilterEventKind::Searched => current.clone().with_search(self.search_term.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FilterEvent)>;

/// An explicit observer list for filter events.
///
/// The filter controls publish here; the scroll controller (or whatever owns it) subscribes.
#[derive(Default)]
pub struct FilterBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl FilterBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&FilterEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` if `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Delivers `event` to every listener in subscription order. Returns how many were called.
    pub fn publish(&mut self, event: &FilterEvent) -> usize {
        atrace!(
            kind = ?event.kind,
            category = event.category.as_str(),
            search = event.search_term.as_str(),
            listeners = self.listeners.len(),
            "FilterBus::publish"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
        self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for FilterBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBus")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
