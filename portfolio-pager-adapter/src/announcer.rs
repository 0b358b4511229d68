use alloc::string::String;

/// Text for an assistive-technology live region.
///
/// Each announcement is cleared `clear_after_ms` later (adapter-driven via `tick`), so the next
/// identical message is still a change the platform will read out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveAnnouncer {
    text: String,
    clear_at_ms: Option<u64>,
    clear_after_ms: u64,
}

impl LiveAnnouncer {
    pub fn new(clear_after_ms: u64) -> Self {
        Self {
            text: String::new(),
            clear_at_ms: None,
            clear_after_ms,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        self.clear_at_ms.is_some()
    }

    /// Replaces the current text and restarts the clear timer.
    ///
    /// Empty messages are ignored.
    pub fn announce(&mut self, message: &str, now_ms: u64) -> bool {
        if message.is_empty() {
            return false;
        }
        self.text.clear();
        self.text.push_str(message);
        self.clear_at_ms = Some(now_ms.saturating_add(self.clear_after_ms));
        true
    }

    /// Clears the text once its delay has elapsed. Returns `true` when it was cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.clear_at_ms {
            Some(at) if now_ms >= at => {
                self.text.clear();
                self.clear_at_ms = None;
                true
            }
            _ => false,
        }
    }
}
