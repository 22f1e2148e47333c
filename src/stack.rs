//! Parent side of the toasts: mounting, queuing, auto-dismiss and removal.
//!
//! The stack mounts at most `max_visible` toasts and queues the rest. Every
//! mounted toast owns its own auto-dismiss timer. A toast leaves the stack
//! only after its completion callback fired, via [`ToastStack::next_removed`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_channel::{Receiver, Sender, unbounded};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::Result;
use crate::config::{MAX_VISIBLE_BOUNDS, ToastSettings};
use crate::error::NotifyError;
use crate::toast::{
    Dismisser, NotificationDescriptor, NotificationHandle, PointerEvent, Snapshot, Target,
    TransientNotification,
};

/// Unique identifier for a pushed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Auto-dismiss timer of one toast; aborted when dropped.
struct AutoDismissTimer(JoinHandle<()>);

impl AutoDismissTimer {
    fn spawn(delay: Duration, dismisser: Dismisser) -> Self {
        Self(tokio::spawn(async move {
            sleep(delay).await;
            dismisser.dismiss();
        }))
    }
}

impl Drop for AutoDismissTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

struct Mounted {
    id: NotificationId,
    handle: NotificationHandle,
    auto_dismiss: Option<AutoDismissTimer>,
}

struct Pending {
    id: NotificationId,
    descriptor: NotificationDescriptor,
}

/// A mounted toast as seen by a renderer.
#[derive(Debug)]
pub struct VisibleToast<'a> {
    pub id: NotificationId,
    pub descriptor: &'a NotificationDescriptor,
    pub snapshot: Snapshot,
}

pub struct ToastStack {
    settings: ToastSettings,
    /// Mount order, oldest first.
    mounted: Vec<Mounted>,
    queue: VecDeque<Pending>,
    completed_tx: Sender<NotificationId>,
    completed_rx: Receiver<NotificationId>,
}

impl ToastStack {
    /// Builds an empty stack. `max_visible` is clamped to [`MAX_VISIBLE_BOUNDS`].
    #[must_use]
    pub fn new(mut settings: ToastSettings) -> Self {
        let clamped = settings
            .max_visible
            .clamp(*MAX_VISIBLE_BOUNDS.start(), *MAX_VISIBLE_BOUNDS.end());
        if clamped != settings.max_visible {
            warn!(
                requested = settings.max_visible,
                max_visible = clamped,
                "max_visible out of range, clamping"
            );
            settings.max_visible = clamped;
        }
        let (completed_tx, completed_rx) = unbounded();
        Self {
            mounted: Vec::with_capacity(settings.max_visible),
            settings,
            queue: VecDeque::new(),
            completed_tx,
            completed_rx,
        }
    }

    /// Shows `descriptor`, or queues it when the screen is full.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidDescriptor`] for a descriptor without a
    /// title and [`NotifyError::QueueFull`] when the queue is at its bound.
    pub fn push(&mut self, descriptor: NotificationDescriptor) -> Result<NotificationId> {
        descriptor.validate()?;
        let id = NotificationId::next();

        if self.mounted.len() < self.settings.max_visible {
            self.mount(id, descriptor);
        } else if self.queue.len() < self.settings.queue_bound {
            debug!(%id, queued = self.queue.len() + 1, "screen full, queuing toast");
            self.queue.push_back(Pending { id, descriptor });
        } else {
            warn!(%id, title = %descriptor.title, "toast queue full, dropping notification");
            return Err(NotifyError::QueueFull {
                capacity: self.settings.queue_bound,
            }
            .into());
        }
        Ok(id)
    }

    fn mount(&mut self, id: NotificationId, descriptor: NotificationDescriptor) {
        let severity = descriptor.severity;
        info!(%id, %severity, title = %descriptor.title, "mounting toast");

        let completed = self.completed_tx.clone();
        let handle = TransientNotification::mount(descriptor, move || {
            if completed.try_send(id).is_err() {
                trace!(%id, "stack gone before toast completed");
            }
        });
        let auto_dismiss = self
            .settings
            .auto_dismiss_for(severity)
            .map(|delay| AutoDismissTimer::spawn(delay, handle.dismisser()));

        self.mounted.push(Mounted {
            id,
            handle,
            auto_dismiss,
        });
    }

    /// Forwards a click to a mounted toast. A user click supersedes its
    /// auto-dismiss timer. Returns `false` for unknown ids.
    pub fn click(&mut self, id: NotificationId, target: Target) -> bool {
        let Some(entry) = self.mounted.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        entry.auto_dismiss = None;
        entry.handle.click(target);
        true
    }

    pub fn pointer(&self, id: NotificationId, event: PointerEvent) -> bool {
        self.find(id).is_some_and(|entry| {
            entry.handle.pointer(event);
            true
        })
    }

    /// Dismisses a toast programmatically. A queued toast is dropped without
    /// ever being shown. Returns `false` for unknown ids.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(entry) = self.mounted.iter_mut().find(|m| m.id == id) {
            entry.auto_dismiss = None;
            entry.handle.auto_dismiss();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|p| p.id == id) {
            self.queue.remove(pos);
            debug!(%id, "queued toast dismissed before display");
            return true;
        }
        false
    }

    /// Waits for the next toast to finish its exit, unmounts it and promotes
    /// queued toasts. Returns `None` right away when nothing is mounted.
    pub async fn next_removed(&mut self) -> Option<NotificationId> {
        while !self.mounted.is_empty() {
            let id = self.completed_rx.recv().await.ok()?;
            if self.remove(id) {
                return Some(id);
            }
            trace!(%id, "completion for a toast no longer mounted");
        }
        None
    }

    /// Non-blocking variant of [`Self::next_removed`]: removes every toast
    /// whose completion is already pending.
    pub fn drain_removed(&mut self) -> Vec<NotificationId> {
        let mut removed = Vec::new();
        while let Ok(id) = self.completed_rx.try_recv() {
            if self.remove(id) {
                removed.push(id);
            }
        }
        removed
    }

    fn remove(&mut self, id: NotificationId) -> bool {
        let Some(pos) = self.mounted.iter().position(|m| m.id == id) else {
            return false;
        };
        let entry = self.mounted.remove(pos);
        entry.handle.unmount();
        info!(%id, "toast removed");
        self.promote_from_queue();
        true
    }

    fn promote_from_queue(&mut self) {
        while self.mounted.len() < self.settings.max_visible {
            let Some(Pending { id, descriptor }) = self.queue.pop_front() else {
                break;
            };
            self.mount(id, descriptor);
        }
    }

    /// Unmounts every toast without running their completion callbacks and
    /// empties the queue.
    pub fn clear(&mut self) {
        let dropped = self.mounted.len() + self.queue.len();
        self.mounted.clear();
        self.queue.clear();
        while self.completed_rx.try_recv().is_ok() {}
        if dropped > 0 {
            info!(dropped, "toast stack cleared");
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = VisibleToast<'_>> {
        self.mounted.iter().map(|m| VisibleToast {
            id: m.id,
            descriptor: m.handle.descriptor(),
            snapshot: m.handle.snapshot(),
        })
    }

    /// Change notifications for one mounted toast.
    #[must_use]
    pub fn subscribe(&self, id: NotificationId) -> Option<watch::Receiver<Snapshot>> {
        self.find(id).map(|entry| entry.handle.subscribe())
    }

    #[must_use]
    pub fn has_auto_dismiss(&self, id: NotificationId) -> bool {
        self.find(id).is_some_and(|entry| entry.auto_dismiss.is_some())
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.mounted.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.queue.is_empty()
    }

    fn find(&self, id: NotificationId) -> Option<&Mounted> {
        self.mounted.iter().find(|m| m.id == id)
    }
}

impl fmt::Debug for ToastStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastStack")
            .field("visible", &self.mounted.len())
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}
