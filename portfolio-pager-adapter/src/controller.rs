use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use portfolio_pager::card::render_skeleton_cards;
use portfolio_pager::{Batch, FilterContext, FilterEpoch, PagerStatistics, Project};

use crate::key::RenderedIds;
use crate::{
    BatchSource, FilterEvent, GalleryView, LiveAnnouncer, Panel, RenderError, ScrollOptions, Span,
};

const MSG_ALL_LOADED: &str = "All projects have been loaded";
const MSG_NO_RESULTS: &str = "No projects match the current filters";
const MSG_FAILED: &str = "Failed to load projects. Please try again.";

/// The controller's render state. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Idle,
    Loading,
    Error,
    /// Terminal for the current filter context; left only by a reset.
    EndOfContent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadKind {
    /// Re-derive the initial batch of the current filter (clears the list).
    Initial,
    /// Append the batch following what is already rendered.
    Next,
}

/// Identifies one outstanding load.
///
/// Tickets are tagged with the filter epoch they were issued under; a ticket from before a
/// filter reset is stale and its completion is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: FilterEpoch,
    kind: LoadKind,
    seq: u64,
}

impl LoadTicket {
    pub fn epoch(&self) -> FilterEpoch {
        self.epoch
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }
}

/// What happened when a load was completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were mounted. `rendered` excludes ids that were already on screen.
    Loaded { rendered: usize, has_more: bool },
    /// The source had nothing more to deliver.
    EndOfContent,
    Failed { message: String },
    /// The ticket no longer matches the controller (filter reset, teardown, or double completion).
    Stale,
    /// No load was started (already loading, in error, at end of content, or not observing).
    Rejected,
}

/// Batch latency bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadStats {
    pub load_count: u64,
    pub total_load_ms: u64,
    pub last_load_ms: Option<u64>,
}

impl LoadStats {
    fn record(&mut self, elapsed_ms: u64) {
        self.load_count = self.load_count.saturating_add(1);
        self.total_load_ms = self.total_load_ms.saturating_add(elapsed_ms);
        self.last_load_ms = Some(elapsed_ms);
    }

    pub fn average_load_ms(&self) -> Option<u64> {
        self.total_load_ms.checked_div(self.load_count)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerStatistics {
    /// `None` until a source is attached.
    pub pager: Option<PagerStatistics>,
    pub loads: LoadStats,
    pub state: ScrollState,
    pub rendered: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InitialReason {
    Startup,
    Reset,
}

/// Drives a [`BatchSource`] from viewport signals and renders into a [`GalleryView`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_sentinel_geometry` / `on_intersection` when the sentinel moves relative to the viewport
/// - `fulfill(ticket, now_ms)` once the load a ticket stands for may complete
/// - `on_filter_event` when the page's filter controls change
/// - `retry` from the error panel's retry control
/// - `tick(now_ms)` each frame/timer tick (clears live region announcements)
///
/// At most one load is in flight. Triggers that arrive while loading are dropped, not queued.
pub struct ScrollController<S, V> {
    source: Option<S>,
    view: V,
    options: ScrollOptions,
    filter: FilterContext,
    state: ScrollState,
    panel: Panel,
    observing: bool,
    torn_down: bool,

    in_flight: Option<LoadTicket>,
    started_ms: u64,
    next_seq: u64,
    failed: Option<LoadKind>,
    last_error: Option<String>,
    pending: Option<Batch>, // fetched but not mounted (render failure)
    rendered_epoch: Option<FilterEpoch>, // epoch of the last initial render

    rendered: RenderedIds,
    announcer: LiveAnnouncer,
    loads: LoadStats,
}

impl<S: BatchSource, V: GalleryView> ScrollController<S, V> {
    /// Creates a controller and performs the initial render.
    ///
    /// If the source could not be created, the controller starts in `Error` without requesting
    /// anything. Use `attach_source` once a working source is available.
    pub fn initialize<E: core::fmt::Display>(
        source: Result<S, E>,
        view: V,
        options: ScrollOptions,
        now_ms: u64,
    ) -> Self {
        let mut c = Self {
            source: None,
            view,
            options,
            filter: FilterContext::all(),
            state: ScrollState::Idle,
            panel: Panel::Hidden,
            observing: false,
            torn_down: false,
            in_flight: None,
            started_ms: now_ms,
            next_seq: 0,
            failed: None,
            last_error: None,
            pending: None,
            rendered_epoch: None,
            rendered: RenderedIds::default(),
            announcer: LiveAnnouncer::new(options.announce_clear_ms),
            loads: LoadStats::default(),
        };
        match source {
            Ok(source) => c.attach_source(source, now_ms),
            Err(err) => {
                let message = err.to_string();
                awarn!(error = message.as_str(), "ScrollController: source failed to load");
                c.fail(LoadKind::Initial, message, now_ms);
            }
        }
        c
    }

    /// Installs a source (replacing any previous one) and renders its current filter from the
    /// start.
    pub fn attach_source(&mut self, source: S, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.filter = source.filter().clone();
        self.source = Some(source);
        self.failed = None;
        self.last_error = None;
        self.pending = None;
        self.render_initial(InitialReason::Startup, now_ms);
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ScrollState::Loading
    }

    pub fn presentation(&self) -> Panel {
        self.panel
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.in_flight
    }

    pub fn filter(&self) -> &FilterContext {
        &self.filter
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Changing the source's filter through this makes any in-flight ticket stale, and the view
    /// is rebuilt from the source's new filter on the next trigger or completion.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The message of the most recent failure, kept until the next reset or successful source
    /// attach.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn announcement(&self) -> &str {
        self.announcer.text()
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    pub fn load_stats(&self) -> &LoadStats {
        &self.loads
    }

    pub fn statistics(&self) -> ControllerStatistics {
        ControllerStatistics {
            pager: self.source.as_ref().map(|s| s.statistics()),
            loads: self.loads,
            state: self.state,
            rendered: self.rendered.len(),
        }
    }

    /// Call this when the sentinel's intersection status changes.
    ///
    /// Returns a ticket when a load was started. Complete it with `fulfill`.
    pub fn on_intersection(&mut self, is_intersecting: bool, now_ms: u64) -> Option<LoadTicket> {
        if !is_intersecting {
            return None;
        }
        if !self.torn_down && self.in_flight.is_none() && self.source_drifted() {
            self.resync(now_ms);
            return None;
        }
        if self.torn_down
            || !self.observing
            || self.state != ScrollState::Idle
            || self.in_flight.is_some()
        {
            atrace!(state = ?self.state, observing = self.observing, "on_intersection: dropped");
            return None;
        }
        self.begin(LoadKind::Next, now_ms)
    }

    /// Same as `on_intersection`, computing intersection from viewport and sentinel extents.
    pub fn on_sentinel_geometry(
        &mut self,
        viewport: Span,
        sentinel: Span,
        now_ms: u64,
    ) -> Option<LoadTicket> {
        let hit = self.options.intersection.is_intersecting(viewport, sentinel);
        self.on_intersection(hit, now_ms)
    }

    /// Starts and completes a load in one call (no simulated latency).
    pub fn load_more(&mut self, now_ms: u64) -> LoadOutcome {
        match self.on_intersection(true, now_ms) {
            Some(ticket) => self.fulfill(ticket, now_ms),
            None => LoadOutcome::Rejected,
        }
    }

    /// Explicit retry from the `Error` state.
    ///
    /// Clears the error and re-issues the load that failed. Returns `None` when not in `Error`
    /// or when there is no source to retry against.
    pub fn retry(&mut self, now_ms: u64) -> Option<LoadTicket> {
        if self.torn_down || self.state != ScrollState::Error || self.source.is_none() {
            return None;
        }
        let kind = self.failed.take().unwrap_or(LoadKind::Next);
        adebug!(kind = ?kind, "ScrollController::retry");
        self.state = ScrollState::Idle;
        self.begin(kind, now_ms)
    }

    fn begin(&mut self, kind: LoadKind, now_ms: u64) -> Option<LoadTicket> {
        let epoch = self.source.as_ref()?.epoch();
        let ticket = LoadTicket {
            epoch,
            kind,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.in_flight = Some(ticket);
        self.started_ms = now_ms;
        self.state = ScrollState::Loading;
        self.show(Panel::Loading);
        adebug!(epoch = epoch.0, kind = ?kind, seq = ticket.seq, "load started");
        Some(ticket)
    }

    /// Completes the load `ticket` stands for.
    ///
    /// Completions for tickets that are no longer current are discarded without touching the
    /// source or the view.
    pub fn fulfill(&mut self, ticket: LoadTicket, now_ms: u64) -> LoadOutcome {
        if self.torn_down || self.in_flight != Some(ticket) {
            adebug!(seq = ticket.seq, epoch = ticket.epoch.0, "stale completion discarded");
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        let current = self.source.as_ref().map(|s| s.epoch());
        if current != Some(ticket.epoch) {
            awarn!(
                ticket_epoch = ticket.epoch.0,
                "source epoch changed under an in-flight load"
            );
            self.resync(now_ms);
            return LoadOutcome::Stale;
        }

        match ticket.kind {
            LoadKind::Initial => {
                self.render_initial(InitialReason::Reset, now_ms);
                match self.state {
                    ScrollState::Error => LoadOutcome::Failed {
                        message: self.last_error.clone().unwrap_or_default(),
                    },
                    _ => LoadOutcome::Loaded {
                        rendered: self.rendered.len(),
                        has_more: self.state == ScrollState::Idle,
                    },
                }
            }
            LoadKind::Next => self.complete_next(ticket, now_ms),
        }
    }

    fn complete_next(&mut self, ticket: LoadTicket, now_ms: u64) -> LoadOutcome {
        let fetched = match self.pending.take() {
            Some(batch) => Ok(batch),
            None => match self.source.as_mut() {
                Some(source) => source.next_batch().map_err(|e| e.to_string()),
                None => Err(String::from("no source attached")),
            },
        };

        let batch = match fetched {
            Ok(batch) => batch,
            Err(message) => {
                awarn!(error = message.as_str(), "batch fetch failed");
                self.fail(LoadKind::Next, message.clone(), now_ms);
                return LoadOutcome::Failed { message };
            }
        };

        if batch.epoch != ticket.epoch {
            self.resync(now_ms);
            return LoadOutcome::Stale;
        }

        if batch.is_empty() {
            self.end_of_content(None, now_ms);
            return LoadOutcome::EndOfContent;
        }

        let rendered = match self.mount(&batch.items) {
            Ok(n) => n,
            Err(err) => {
                let message = err.to_string();
                awarn!(error = message.as_str(), "batch render failed");
                self.pending = Some(batch);
                self.fail(LoadKind::Next, message.clone(), now_ms);
                return LoadOutcome::Failed { message };
            }
        };

        let elapsed = now_ms.saturating_sub(self.started_ms);
        self.loads.record(elapsed);
        adebug!(
            batch = self.loads.load_count,
            elapsed_ms = elapsed,
            rendered,
            has_more = batch.has_more,
            "batch loaded"
        );

        if batch.has_more {
            self.state = ScrollState::Idle;
            self.show(Panel::Hidden);
            self.announce(&format!("Loaded {} more projects", batch.len()), now_ms);
        } else {
            self.end_of_content(Some(batch.len()), now_ms);
        }
        LoadOutcome::Loaded {
            rendered,
            has_more: batch.has_more,
        }
    }

    /// Handles a published filter/search change: resets every flag and re-renders from the new
    /// initial batch.
    pub fn on_filter_event(&mut self, event: &FilterEvent, now_ms: u64) {
        let filter = event.resolve(&self.filter);
        self.apply_filter(filter, now_ms);
    }

    pub fn apply_filter(&mut self, filter: FilterContext, now_ms: u64) {
        if self.torn_down {
            return;
        }
        adebug!(
            category = filter.category().as_str(),
            search = filter.search(),
            "ScrollController::apply_filter"
        );
        self.filter = filter;
        self.in_flight = None;
        self.failed = None;
        self.last_error = None;
        self.pending = None;
        self.state = ScrollState::Idle;
        self.render_initial(InitialReason::Reset, now_ms);
    }

    fn render_initial(&mut self, reason: InitialReason, now_ms: u64) {
        self.in_flight = None;
        self.view
            .set_skeleton(&render_skeleton_cards(self.options.skeleton_count));
        self.show(Panel::Skeleton);

        let filter = self.filter.clone();
        let (fetched, filtered) = match self.source.as_mut() {
            Some(source) => {
                let fetched = source.apply_filter(filter).map_err(|e| e.to_string());
                (fetched, source.filtered_len())
            }
            None => (Err(String::from("no source attached")), 0),
        };

        let batch = match fetched {
            Ok(batch) => batch,
            Err(message) => {
                awarn!(error = message.as_str(), "initial batch failed");
                self.fail(LoadKind::Initial, message, now_ms);
                return;
            }
        };
        self.rendered_epoch = Some(batch.epoch);

        self.view.clear_items();
        self.rendered.clear();
        if let Err(err) = self.mount(&batch.items) {
            let message = err.to_string();
            awarn!(error = message.as_str(), "initial render failed");
            self.fail(LoadKind::Initial, message, now_ms);
            return;
        }

        if filtered == 0 {
            self.state = ScrollState::EndOfContent;
            self.set_observing(false);
            self.show(Panel::NoResults);
            self.announce(MSG_NO_RESULTS, now_ms);
            return;
        }

        let message = match reason {
            InitialReason::Startup => format!("Loaded {} projects initially", batch.len()),
            InitialReason::Reset => format!("Showing {} of {} projects", batch.len(), filtered),
        };
        if batch.has_more {
            self.state = ScrollState::Idle;
            self.set_observing(true);
            self.show(Panel::Hidden);
            self.announce(&message, now_ms);
        } else {
            self.state = ScrollState::EndOfContent;
            self.set_observing(false);
            self.show(Panel::EndOfContent);
            self.announce(&message, now_ms);
        }
    }

    /// Whether the source moved to another filter context behind the controller's back.
    fn source_drifted(&self) -> bool {
        match self.source.as_ref() {
            Some(source) => self.rendered_epoch.is_some_and(|e| e != source.epoch()),
            None => false,
        }
    }

    /// Rebuilds the view from the source's current filter, so rendered items stay a prefix of it.
    fn resync(&mut self, now_ms: u64) {
        let Some(filter) = self.source.as_ref().map(|s| s.filter().clone()) else {
            return;
        };
        adebug!(
            category = filter.category().as_str(),
            search = filter.search(),
            "ScrollController: source filter changed, re-rendering"
        );
        self.filter = filter;
        self.in_flight = None;
        self.failed = None;
        self.last_error = None;
        self.pending = None;
        self.state = ScrollState::Idle;
        self.render_initial(InitialReason::Reset, now_ms);
    }

    /// Mounts the items that are not on screen yet. Returns how many were mounted.
    fn mount(&mut self, items: &[Project]) -> Result<usize, RenderError> {
        let fresh: Vec<Project> = items
            .iter()
            .filter(|p| !self.rendered.contains(&p.id))
            .cloned()
            .collect();
        if fresh.len() != items.len() {
            awarn!(
                skipped = items.len() - fresh.len(),
                "skipping projects that are already rendered"
            );
        }
        if fresh.is_empty() {
            return Ok(0);
        }
        self.view.append_items(&fresh)?;
        self.rendered.extend(fresh.iter().map(|p| p.id));
        Ok(fresh.len())
    }

    fn end_of_content(&mut self, last_batch: Option<usize>, now_ms: u64) {
        self.state = ScrollState::EndOfContent;
        self.set_observing(false);
        self.show(Panel::EndOfContent);
        match last_batch {
            Some(n) => self.announce(
                &format!("Loaded {n} more projects. {MSG_ALL_LOADED}"),
                now_ms,
            ),
            None => self.announce(MSG_ALL_LOADED, now_ms),
        }
    }

    fn fail(&mut self, kind: LoadKind, message: String, now_ms: u64) {
        self.state = ScrollState::Error;
        self.failed = Some(kind);
        self.last_error = Some(message);
        self.in_flight = None;
        self.show(Panel::Error);
        self.announce(MSG_FAILED, now_ms);
    }

    fn show(&mut self, panel: Panel) {
        self.panel = panel;
        self.view.show_panel(panel);
    }

    fn set_observing(&mut self, observing: bool) {
        if self.observing != observing {
            self.observing = observing;
            self.view.set_trigger_observed(observing);
        }
    }

    fn announce(&mut self, message: &str, now_ms: u64) {
        if self.announcer.announce(message, now_ms) {
            self.view.set_live_text(self.announcer.text());
        }
    }

    /// Advances timers. Clears the live region once an announcement has been up long enough.
    pub fn tick(&mut self, now_ms: u64) {
        if self.announcer.tick(now_ms) {
            self.view.set_live_text("");
        }
    }

    /// Stops observing the sentinel and ignores every later event.
    ///
    /// An in-flight load is abandoned; completing its ticket yields `LoadOutcome::Stale`.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        adebug!(rendered = self.rendered.len(), "ScrollController::teardown");
        self.set_observing(false);
        self.torn_down = true;
        self.in_flight = None;
        self.view.set_live_text("");
    }

    /// Tears down and hands back the source and view.
    pub fn into_parts(mut self) -> (Option<S>, V) {
        self.teardown();
        (self.source, self.view)
    }
}

impl<S, V> core::fmt::Debug for ScrollController<S, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollController")
            .field("state", &self.state)
            .field("panel", &self.panel)
            .field("filter", &self.filter)
            .field("observing", &self.observing)
            .field("torn_down", &self.torn_down)
            .field("in_flight", &self.in_flight)
            .field("rendered", &self.rendered.len())
            .field("loads", &self.loads)
            .finish_non_exhaustive()
    }
}
