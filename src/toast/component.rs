//! Runs one toast lifecycle as a tokio task.
//!
//! The task owns the [`Lifecycle`], both timer slots and the completion
//! callback. The parent talks to it through a [`NotificationHandle`]; dropping
//! the handle aborts the task, which drops every pending timer with it.

use async_channel::{Receiver, Sender, TrySendError, unbounded};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span, trace};

use super::NotificationDescriptor;
use super::machine::{
    Command, DismissTrigger, Input, Lifecycle, LifecyclePhase, PointerEvent, PressState, TimerKind,
};
use super::surface::{self, ClickEvent, Target};
use super::timer::TimerSlot;
use super::view::Appearance;

/// Completion callback, invoked once the exit animation has finished.
pub type OnDismiss = Box<dyn FnOnce() + Send + 'static>;

/// Observable state of a mounted toast.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub phase: LifecyclePhase,
    pub press: PressState,
}

impl Snapshot {
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        Appearance::resolve(self.phase, self.press)
    }
}

impl From<&Lifecycle> for Snapshot {
    fn from(lifecycle: &Lifecycle) -> Self {
        Self {
            phase: lifecycle.phase(),
            press: lifecycle.press(),
        }
    }
}

pub struct TransientNotification {
    lifecycle: Lifecycle,
    entrance: TimerSlot,
    exit: TimerSlot,
    on_dismiss: Option<OnDismiss>,
    inputs: Receiver<Input>,
    state: watch::Sender<Snapshot>,
}

impl TransientNotification {
    /// Mounts a toast and starts its entrance.
    ///
    /// `on_dismiss` runs at most once, after the exit animation. It never runs
    /// if the returned handle is dropped first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<F>(descriptor: NotificationDescriptor, on_dismiss: F) -> NotificationHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let (lifecycle, entrance) = Lifecycle::mount();
        let (state_tx, state_rx) = watch::channel(Snapshot::from(&lifecycle));

        let mut component = Self {
            lifecycle,
            entrance: TimerSlot::default(),
            exit: TimerSlot::default(),
            on_dismiss: Some(Box::new(on_dismiss)),
            inputs: rx,
            state: state_tx,
        };
        component.apply(entrance);

        let span = debug_span!("toast", severity = %descriptor.severity, title = %descriptor.title);
        let task = tokio::spawn(component.run().instrument(span));

        NotificationHandle {
            descriptor,
            inputs: tx,
            state: state_rx,
            task,
        }
    }

    async fn run(mut self) {
        loop {
            let input = tokio::select! {
                biased;
                () = self.exit.elapsed() => Input::ExitElapsed,
                () = self.entrance.elapsed() => Input::EntranceElapsed,
                received = self.inputs.recv() => match received {
                    Ok(input) => input,
                    Err(_) => {
                        trace!("every handle is gone, stopping");
                        return;
                    }
                },
            };

            if self.step(input) {
                return;
            }
        }
    }

    /// Feeds one input through the lifecycle. Returns `true` once `Done`.
    ///
    /// Observers only see `Done` after `on_dismiss` has returned.
    fn step(&mut self, input: Input) -> bool {
        let commands = self.lifecycle.handle(input);
        for command in commands {
            self.apply(command);
        }
        self.publish();
        self.lifecycle.phase() == LifecyclePhase::Done
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Schedule { timer, after } => self.slot(timer).arm(after),
            Command::Cancel(timer) => self.slot(timer).cancel(),
            Command::Complete => {
                self.entrance.cancel();
                self.exit.cancel();
                self.inputs.close();
                if let Some(on_dismiss) = self.on_dismiss.take() {
                    debug!("toast finished, notifying parent");
                    on_dismiss();
                }
            }
        }
    }

    fn slot(&mut self, timer: TimerKind) -> &mut TimerSlot {
        match timer {
            TimerKind::Entrance => &mut self.entrance,
            TimerKind::Exit => &mut self.exit,
        }
    }

    fn publish(&self) {
        let next = Snapshot::from(&self.lifecycle);
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

/// Parent-side handle of a mounted toast. Dropping it unmounts the toast.
pub struct NotificationHandle {
    descriptor: NotificationDescriptor,
    inputs: Sender<Input>,
    state: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl NotificationHandle {
    #[must_use]
    pub const fn descriptor(&self) -> &NotificationDescriptor {
        &self.descriptor
    }

    /// Delivers a click on `target`, with close-control clicks kept from
    /// reaching the body.
    pub fn click(&self, target: Target) {
        for trigger in surface::dispatch(ClickEvent::new(target)) {
            send(&self.inputs, Input::Dismiss(trigger));
        }
    }

    /// External auto-dismiss signal.
    pub fn auto_dismiss(&self) {
        send(&self.inputs, Input::Dismiss(DismissTrigger::AutoDismiss));
    }

    pub fn pointer(&self, event: PointerEvent) {
        send(&self.inputs, Input::Pointer(event));
    }

    /// A cloneable sender of the auto-dismiss trigger, for timers owned elsewhere.
    #[must_use]
    pub fn dismisser(&self) -> Dismisser {
        Dismisser {
            inputs: self.inputs.clone(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        *self.state.borrow()
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.snapshot().phase
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.snapshot().press.is_pressed()
    }

    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.snapshot().appearance()
    }

    /// Receiver notified on every phase or press change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.clone()
    }

    /// Resolves once the toast reached `Done` or its task stopped.
    pub async fn finished(&self) {
        let mut state = self.state.clone();
        let _ = state.wait_for(|s| s.phase == LifecyclePhase::Done).await;
    }

    /// Removes the toast, cancelling whatever it still had scheduled.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for NotificationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHandle")
            .field("title", &self.descriptor.title)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

/// Sends the auto-dismiss trigger to one toast.
#[derive(Clone, Debug)]
pub struct Dismisser {
    inputs: Sender<Input>,
}

impl Dismisser {
    pub fn dismiss(&self) {
        send(&self.inputs, Input::Dismiss(DismissTrigger::AutoDismiss));
    }
}

fn send(inputs: &Sender<Input>, input: Input) {
    if let Err(TrySendError::Closed(input) | TrySendError::Full(input)) = inputs.try_send(input) {
        trace!(?input, "toast no longer accepts input, ignoring");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ENTRANCE_DELAY, EXIT_DURATION};
    use crate::types::{Icon, Severity};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    fn mount_counted() -> (NotificationHandle, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = TransientNotification::mount(
            NotificationDescriptor::new(Icon::from("💸"), "Saved", "", Severity::Success),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        (handle, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn becomes_visible_after_entrance_delay() {
        let (handle, _) = mount_counted();
        assert_eq!(handle.phase(), LifecyclePhase::Entering);
        sleep(ENTRANCE_DELAY + Duration::from_millis(1)).await;
        assert_eq!(handle.phase(), LifecyclePhase::Visible);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_resolves_after_exit() {
        let (handle, calls) = mount_counted();
        sleep(Duration::from_millis(50)).await;
        handle.click(Target::Body);
        handle.finished().await;
        assert_eq!(handle.phase(), LifecyclePhase::Done);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismisser_triggers_exit() {
        let (handle, calls) = mount_counted();
        let dismisser = handle.dismisser();
        dismisser.dismiss();
        dismisser.dismiss();
        sleep(EXIT_DURATION + Duration::from_millis(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        dismisser.dismiss();
        sleep(EXIT_DURATION * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
