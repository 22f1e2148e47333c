use std::fmt;
use std::time::Duration;

use super::machine::{LifecyclePhase, PressState};
use super::{EXIT_DURATION, NotificationDescriptor};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slide {
    /// Translated fully to the right, out of view.
    Offscreen,
    InPlace,
}

/// Visual state the renderer transitions to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub slide: Slide,
    pub opacity: f32,
    pub scale: f32,
    /// Must stay equal to the exit timer, or the toast is removed mid-animation.
    pub transition: Duration,
}

const PRESSED_SCALE: f32 = 0.98;

impl Appearance {
    #[must_use]
    pub fn resolve(phase: LifecyclePhase, press: PressState) -> Self {
        let (slide, opacity) = match phase {
            LifecyclePhase::Visible => (Slide::InPlace, 1.0),
            LifecyclePhase::Entering | LifecyclePhase::Exiting | LifecyclePhase::Done => {
                (Slide::Offscreen, 0.0)
            }
        };
        let scale = if press.is_pressed() { PRESSED_SCALE } else { 1.0 };
        Self {
            slide,
            opacity,
            scale,
            transition: EXIT_DURATION,
        }
    }
}

/// Plain-text card, one line per toast.
pub struct Card<'a> {
    descriptor: &'a NotificationDescriptor,
    phase: LifecyclePhase,
    press: PressState,
}

impl<'a> Card<'a> {
    #[must_use]
    pub const fn new(
        descriptor: &'a NotificationDescriptor,
        phase: LifecyclePhase,
        press: PressState,
    ) -> Self {
        Self {
            descriptor,
            phase,
            press,
        }
    }
}

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.descriptor;
        write!(
            f,
            "[{tone}] {icon} {title}: {description} ({phase}{pressed}) [x]",
            tone = d.severity.tone(),
            icon = d.icon,
            title = d.title,
            description = d.description,
            phase = self.phase,
            pressed = if self.press.is_pressed() { ", pressed" } else { "" },
        )
    }
}
