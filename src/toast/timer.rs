use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep, sleep_until};

/// A single cancellable deadline owned by a toast instance.
///
/// Dropping the slot (or the instance holding it) cancels the deadline.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<Pin<Box<Sleep>>>,
}

impl TimerSlot {
    /// Arms the slot, replacing any deadline already pending.
    pub fn arm(&mut self, after: Duration) {
        self.pending = Some(Box::pin(sleep_until(Instant::now() + after)));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves when the armed deadline passes, then disarms the slot.
    /// Never resolves while the slot is empty.
    pub async fn elapsed(&mut self) {
        match self.pending.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.pending = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimerSlot;
    use std::time::Duration;
    use tokio::time::{Instant, timeout};

    #[tokio::test(start_paused = true)]
    async fn armed_slot_fires_after_delay() {
        let mut slot = TimerSlot::default();
        let start = Instant::now();
        slot.arm(Duration::from_millis(300));
        slot.elapsed().await;
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(start.elapsed() < Duration::from_millis(310));
        assert!(!slot.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_slot_never_fires() {
        let mut slot = TimerSlot::default();
        slot.arm(Duration::from_millis(10));
        slot.cancel();
        assert!(
            timeout(Duration::from_secs(5), slot.elapsed())
                .await
                .is_err()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_deadline() {
        let mut slot = TimerSlot::default();
        let start = Instant::now();
        slot.arm(Duration::from_millis(10));
        slot.arm(Duration::from_millis(50));
        slot.elapsed().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(start.elapsed() < Duration::from_millis(60));
    }
}
