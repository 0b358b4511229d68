use crate::IntersectionOptions;

/// A one-dimensional extent on the scroll axis, in pixels.
///
/// Adapters usually build these from `getBoundingClientRect()` (top/height) or the equivalent
/// in their toolkit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: i64,
    pub len: u32,
}

impl Span {
    pub fn new(start: i64, len: u32) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.len as i64)
    }
}

impl IntersectionOptions {
    /// Fraction of `target` inside `root` grown by `root_margin`, in `0.0..=1.0`.
    ///
    /// A zero-length target counts as fully inside when it lies within the grown root.
    pub fn intersection_ratio(&self, root: Span, target: Span) -> f32 {
        let margin = self.root_margin as i64;
        let root_start = root.start.saturating_sub(margin);
        let root_end = root.end().saturating_add(margin);

        if target.len == 0 {
            let inside = target.start >= root_start && target.start <= root_end;
            return if inside { 1.0 } else { 0.0 };
        }

        let overlap = target
            .end()
            .min(root_end)
            .saturating_sub(target.start.max(root_start));
        if overlap <= 0 {
            return 0.0;
        }
        (overlap as f32 / target.len as f32).min(1.0)
    }

    /// Whether the sentinel should count as "entered the viewport".
    pub fn is_intersecting(&self, root: Span, target: Span) -> bool {
        let ratio = self.intersection_ratio(root, target);
        ratio > 0.0 && ratio >= self.threshold
    }
}
