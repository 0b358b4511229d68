//! Adapter utilities for the `portfolio-pager` crate.
//!
//! The `portfolio-pager` crate is UI-agnostic and focuses on the data side: catalog, filter,
//! and batch production. This crate provides the framework-neutral pieces an infinite-scroll
//! gallery page needs on top of it:
//!
//! - An infinite scroll controller (single-flight loads, explicit retry, filter resets)
//! - Sentinel intersection math (root margin + threshold)
//! - A live-region announcer with delayed clearing
//! - A typed filter/search event bus
//! - A developer performance overlay with a visibility-driven refresh task (`std` only)
//!
//! This crate is intentionally framework-agnostic (no DOM/web-sys bindings). Adapters provide a
//! [`GalleryView`] and feed the controller events and a clock.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod announcer;
mod bus;
mod controller;
mod intersection;
mod key;
#[cfg(feature = "std")]
mod monitor;
mod options;
mod source;
mod view;


pub use announcer::LiveAnnouncer;
pub use bus::{FilterBus, FilterEvent, FilterEventKind, SubscriptionId};
pub use controller::{
    ControllerStatistics, LoadKind, LoadOutcome, LoadStats, LoadTicket, ScrollController,
    ScrollState,
};
pub use intersection::Span;
#[cfg(feature = "std")]
pub use monitor::{
    Metric, OverlayOptions, OverlaySnapshot, PerfOverlay, PeriodicTask, Rating, VitalReading,
    Vitals, is_toggle_shortcut,
};
pub use options::{IntersectionOptions, ScrollOptions};
pub use source::BatchSource;
pub use view::{GalleryView, MarkupView, Panel, RenderError};
