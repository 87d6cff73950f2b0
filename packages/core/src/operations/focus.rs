//! Active block tracking with a blur grace period
//!
//! Clicking a toolbar button blurs the block surface before the button's own
//! handler runs. The tracker therefore keeps the blurred block active for a
//! short grace period instead of clearing it on blur.

use std::time::Duration;
use tokio::time::Instant;

use crate::models::BlockId;

/// Default grace period between blur and clearing the active block
pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct ActiveBlockTracker {
    active: Option<BlockId>,
    blurred_at: Option<Instant>,
    grace: Duration,
}

impl Default for ActiveBlockTracker {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_GRACE)
    }
}

impl ActiveBlockTracker {
    pub fn new(grace: Duration) -> Self {
        Self {
            active: None,
            blurred_at: None,
            grace,
        }
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Focus, click or keydown on a block surface
    pub fn activate(&mut self, id: impl Into<BlockId>) {
        self.active = Some(id.into());
        self.blurred_at = None;
    }

    /// Start the grace period; the block stays active until it elapses
    pub fn blur(&mut self) {
        if self.active.is_some() && self.blurred_at.is_none() {
            self.blurred_at = Some(Instant::now());
        }
    }

    /// The active block id, or `None` once a blur's grace period has elapsed
    pub fn active(&self) -> Option<&str> {
        match self.blurred_at {
            Some(at) if at.elapsed() >= self.grace => None,
            _ => self.active.as_deref(),
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.blurred_at = None;
    }

    /// Drop `id` if it is the active block (its surface unmounted)
    pub fn forget(&mut self, id: &str) {
        if self.active.as_deref() == Some(id) {
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_active_survives_grace_period() {
        let mut tracker = ActiveBlockTracker::new(Duration::from_millis(150));
        tracker.activate("block-1");
        tracker.blur();

        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(tracker.active(), Some("block-1"));

        tokio::time::advance(Duration::from_millis(60)).await;
        assert_eq!(tracker.active(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refocus_cancels_blur() {
        let mut tracker = ActiveBlockTracker::default();
        tracker.activate("a");
        tracker.blur();
        tokio::time::advance(Duration::from_millis(50)).await;
        tracker.activate("b");

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(tracker.active(), Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_blur_keeps_first_deadline() {
        let mut tracker = ActiveBlockTracker::new(Duration::from_millis(100));
        tracker.activate("a");
        tracker.blur();
        tokio::time::advance(Duration::from_millis(80)).await;
        tracker.blur();
        tokio::time::advance(Duration::from_millis(30)).await;
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn test_forget_only_matching() {
        let mut tracker = ActiveBlockTracker::default();
        tracker.activate("a");
        tracker.forget("b");
        assert_eq!(tracker.active(), Some("a"));
        tracker.forget("a");
        assert_eq!(tracker.active(), None);
    }
}
