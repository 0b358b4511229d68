/// Sentinel observation settings, mirroring `IntersectionObserver` options.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionOptions {
    /// Pixels the root is grown by on both ends, so loads start before the sentinel is visible.
    pub root_margin: u32,
    /// Fraction of the sentinel that must overlap the grown root.
    pub threshold: f32,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self {
            root_margin: 200,
            threshold: 0.1,
        }
    }
}

/// Configuration for [`crate::ScrollController`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOptions {
    pub intersection: IntersectionOptions,
    /// How long an announcement stays in the live region before it is cleared.
    pub announce_clear_ms: u64,
    /// Placeholder cards shown while an initial batch is prepared.
    pub skeleton_count: usize,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            intersection: IntersectionOptions::default(),
            announce_clear_ms: 1000,
            skeleton_count: 8,
        }
    }
}

impl ScrollOptions {
    pub fn with_intersection(mut self, intersection: IntersectionOptions) -> Self {
        self.intersection = intersection;
        self
    }

    pub fn with_root_margin(mut self, root_margin: u32) -> Self {
        self.intersection.root_margin = root_margin;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.intersection.threshold = threshold;
        self
    }

    pub fn with_announce_clear_ms(mut self, announce_clear_ms: u64) -> Self {
        self.announce_clear_ms = announce_clear_ms;
        self
    }

    pub fn with_skeleton_count(mut self, skeleton_count: usize) -> Self {
        self.skeleton_count = skeleton_count;
        self
    }
}
