//! Developer performance overlay.
//!
//! The overlay keeps a short log of reported metrics and the latest Core Web Vitals, and tells
//! the adapter when its panel should be refreshed. Refreshing only happens while the overlay is
//! visible: showing it starts the refresh task, hiding it stops the task.

use std::collections::VecDeque;

use crate::LoadStats;

/// A fixed-interval task with an explicit start/stop lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicTask {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl PeriodicTask {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Starts the task. The first run is due immediately.
    pub fn start(&mut self, now_ms: u64) {
        if self.next_due_ms.is_none() {
            self.next_due_ms = Some(now_ms);
        }
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Returns `true` when a run is due, and schedules the next one.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub rating: Rating,
    pub timestamp_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalReading {
    pub value: f64,
    pub rating: Rating,
}

/// Latest Core Web Vitals readings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub lcp: Option<VitalReading>,
    pub fid: Option<VitalReading>,
    pub cls: Option<VitalReading>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayOptions {
    pub refresh_interval_ms: u64,
    /// Metrics kept in the log; older ones are dropped.
    pub metric_capacity: usize,
    /// Metrics included in a snapshot.
    pub recent_len: usize,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 2000,
            metric_capacity: 50,
            recent_len: 10,
        }
    }
}

/// What the overlay panel should display after a refresh.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlaySnapshot {
    pub taken_at_ms: u64,
    /// Newest first.
    pub recent: Vec<Metric>,
    pub vitals: Vitals,
    pub loads: LoadStats,
}

#[derive(Clone, Debug)]
pub struct PerfOverlay {
    options: OverlayOptions,
    visible: bool,
    refresh: PeriodicTask,
    metrics: VecDeque<Metric>, // newest first
    vitals: Vitals,
}

impl Default for PerfOverlay {
    fn default() -> Self {
        Self::new(OverlayOptions::default())
    }
}

impl PerfOverlay {
    pub fn new(options: OverlayOptions) -> Self {
        Self {
            refresh: PeriodicTask::new(options.refresh_interval_ms),
            options,
            visible: false,
            metrics: VecDeque::new(),
            vitals: Vitals::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_running()
    }

    pub fn show(&mut self, now_ms: u64) {
        self.visible = true;
        self.refresh.start(now_ms);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.refresh.stop();
    }

    /// Returns the new visibility.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.visible {
            self.hide();
        } else {
            self.show(now_ms);
        }
        self.visible
    }

    /// Logs a metric. `LCP`, `FID` and `CLS` also update the vitals.
    pub fn record(&mut self, name: &str, value: f64, rating: Rating, now_ms: u64) {
        let value = (value * 100.0).round() / 100.0;
        let reading = Some(VitalReading { value, rating });
        match name {
            "LCP" => self.vitals.lcp = reading,
            "FID" => self.vitals.fid = reading,
            "CLS" => self.vitals.cls = reading,
            _ => {}
        }
        self.metrics.push_front(Metric {
            name: String::from(name),
            value,
            rating,
            timestamp_ms: now_ms,
        });
        self.metrics.truncate(self.options.metric_capacity);
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn clear(&mut self) {
        self.metrics.clear();
        self.vitals = Vitals::default();
    }

    /// Returns a snapshot when the overlay is visible and a refresh is due.
    pub fn poll(&mut self, now_ms: u64, loads: &LoadStats) -> Option<OverlaySnapshot> {
        if !self.visible || !self.refresh.poll(now_ms) {
            return None;
        }
        Some(OverlaySnapshot {
            taken_at_ms: now_ms,
            recent: self
                .metrics
                .iter()
                .take(self.options.recent_len)
                .cloned()
                .collect(),
            vitals: self.vitals,
            loads: *loads,
        })
    }

    /// Serializes the full metric log and vitals as pretty JSON.
    #[cfg(feature = "json")]
    pub fn export_json(&self, now_ms: u64) -> Result<String, serde_json::Error> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Export<'a> {
            exported_at_ms: u64,
            metrics: &'a VecDeque<Metric>,
            vitals: &'a Vitals,
        }
        serde_json::to_string_pretty(&Export {
            exported_at_ms: now_ms,
            metrics: &self.metrics,
            vitals: &self.vitals,
        })
    }
}

/// Whether a key press is the overlay's toggle shortcut (Ctrl/Cmd + Shift + P).
pub fn is_toggle_shortcut(key: &str, ctrl: bool, meta: bool, shift: bool) -> bool {
    (ctrl || meta) && shift && key.eq_ignore_ascii_case("p")
}
