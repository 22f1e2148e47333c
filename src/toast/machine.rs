//! Lifecycle state machine of a single toast.
//!
//! [`Lifecycle`] is synchronous and clock-free: it consumes [`Input`]s and
//! answers with the [`Command`]s its driver must carry out (arm or cancel a
//! timer, invoke the completion callback). The phase check here is what
//! guarantees the callback runs at most once.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use super::{ENTRANCE_DELAY, EXIT_DURATION};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LifecyclePhase {
    #[default]
    Entering,
    Visible,
    Exiting,
    Done,
}

impl LifecyclePhase {
    #[must_use]
    pub const fn is_dismissed(self) -> bool {
        matches!(self, Self::Exiting | Self::Done)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entering => "entering",
            Self::Visible => "visible",
            Self::Exiting => "exiting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a pointer is currently held on the toast. Cosmetic only.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PressState(bool);

impl PressState {
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DismissTrigger {
    BodyClick,
    CloseControl,
    AutoDismiss,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointerEvent {
    Down,
    Up,
    Leave,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerKind {
    Entrance,
    Exit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Input {
    EntranceElapsed,
    Dismiss(DismissTrigger),
    ExitElapsed,
    Pointer(PointerEvent),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Schedule { timer: TimerKind, after: Duration },
    Cancel(TimerKind),
    /// Invoke the completion callback. Emitted once, on `Exiting -> Done`.
    Complete,
}

#[derive(Debug, Default)]
pub struct Lifecycle {
    phase: LifecyclePhase,
    press: PressState,
}

impl Lifecycle {
    /// Creates a lifecycle in `Entering` together with the entrance timer to arm.
    #[must_use]
    pub fn mount() -> (Self, Command) {
        (
            Self::default(),
            Command::Schedule {
                timer: TimerKind::Entrance,
                after: ENTRANCE_DELAY,
            },
        )
    }

    #[must_use]
    pub const fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub const fn press(&self) -> PressState {
        self.press
    }

    pub fn handle(&mut self, input: Input) -> Vec<Command> {
        match input {
            Input::EntranceElapsed => {
                if self.phase == LifecyclePhase::Entering {
                    self.transition(LifecyclePhase::Visible);
                } else {
                    trace!(phase = %self.phase, "late entrance ignored");
                }
                Vec::new()
            }
            Input::Dismiss(trigger) => self.dismiss(trigger),
            Input::ExitElapsed => {
                if self.phase == LifecyclePhase::Exiting {
                    self.transition(LifecyclePhase::Done);
                    vec![Command::Complete]
                } else {
                    trace!(phase = %self.phase, "stray exit timer ignored");
                    Vec::new()
                }
            }
            Input::Pointer(event) => {
                self.press = PressState(matches!(event, PointerEvent::Down));
                Vec::new()
            }
        }
    }

    fn dismiss(&mut self, trigger: DismissTrigger) -> Vec<Command> {
        if self.phase.is_dismissed() {
            trace!(?trigger, phase = %self.phase, "dismissal already in progress");
            return Vec::new();
        }
        let mut commands = Vec::with_capacity(2);
        if self.phase == LifecyclePhase::Entering {
            commands.push(Command::Cancel(TimerKind::Entrance));
        }
        debug!(?trigger, "dismissal requested");
        self.transition(LifecyclePhase::Exiting);
        commands.push(Command::Schedule {
            timer: TimerKind::Exit,
            after: EXIT_DURATION,
        });
        commands
    }

    fn transition(&mut self, next: LifecyclePhase) {
        debug_assert!(next > self.phase, "lifecycle phases only move forward");
        debug!(from = %self.phase, to = %next, "toast phase change");
        self.phase = next;
    }
}
