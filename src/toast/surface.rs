//! Pointer/tap surface of a toast.
//!
//! A click is dispatched at its target first and then bubbles to the toast
//! body, unless a handler stopped propagation. The close control always stops
//! propagation, so one gesture never yields two dismissals.

use super::machine::DismissTrigger;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// Anywhere on the toast that is not a nested control.
    Body,
    /// The explicit close affordance.
    CloseControl,
}

#[derive(Debug)]
pub struct ClickEvent {
    target: Target,
    propagation_stopped: bool,
}

impl ClickEvent {
    #[must_use]
    pub const fn new(target: Target) -> Self {
        Self {
            target,
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    #[must_use]
    pub const fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Runs the handlers a click reaches and collects the dismissals they request.
#[must_use]
pub fn dispatch(mut event: ClickEvent) -> Vec<DismissTrigger> {
    let mut triggers = Vec::with_capacity(1);
    if event.target() == Target::CloseControl {
        event.stop_propagation();
        triggers.push(DismissTrigger::CloseControl);
    }
    if !event.propagation_stopped() {
        triggers.push(DismissTrigger::BodyClick);
    }
    triggers
}
