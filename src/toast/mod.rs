//! Transient notification ("toast") component.
//!
//! - [`machine`] holds the clock-free lifecycle state machine
//! - [`component`] drives one lifecycle on the tokio runtime
//! - [`surface`] routes clicks from the body and the close control
//! - [`view`] derives the visual state and a text rendering

pub mod component;
pub mod machine;
pub mod surface;
pub mod timer;
pub mod view;

use std::str::FromStr;
use std::time::Duration;

use crate::error::NotifyError;
use crate::types::{Icon, Severity};

pub use component::{Dismisser, NotificationHandle, OnDismiss, Snapshot, TransientNotification};
pub use machine::{DismissTrigger, LifecyclePhase, PointerEvent, PressState};
pub use surface::Target;
pub use view::{Appearance, Card, Slide};

/// Delay before the visible style is applied, so the entrance transition
/// starts from the committed offscreen state.
pub const ENTRANCE_DELAY: Duration = Duration::from_millis(10);

/// Length of the exit animation and of the timer that completes the toast.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

/// What a toast shows. Immutable once mounted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotificationDescriptor {
    pub icon: Icon,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl NotificationDescriptor {
    pub fn new(
        icon: Icon,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            icon,
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Rejects descriptors with nothing to show.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidDescriptor`] when the title is blank.
    pub fn validate(&self) -> Result<(), NotifyError> {
        if self.title.trim().is_empty() {
            return Err(NotifyError::InvalidDescriptor(
                "title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }
}

/// Parses `SEVERITY:TITLE[:DESCRIPTION]`, as accepted on the command line.
impl FromStr for NotificationDescriptor {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let severity = parts
            .next()
            .unwrap_or_default()
            .parse::<Severity>()
            .map_err(NotifyError::InvalidDescriptor)?;
        let title = parts.next().map(str::trim).unwrap_or_default();
        let description = parts.next().map(str::trim).unwrap_or_default();

        let descriptor = Self::new(Icon::default(), title, description, severity);
        descriptor.validate()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationDescriptor;
    use crate::error::NotifyError;
    use crate::types::Severity;

    #[test]
    fn parses_cli_descriptor() {
        let parsed: NotificationDescriptor =
            match "warn:Low balance:Balance below threshold: 12.50".parse() {
                Ok(descriptor) => descriptor,
                Err(err) => panic!("descriptor should parse: {err}"),
            };
        assert_eq!(parsed.severity, Severity::Warning);
        assert_eq!(parsed.title, "Low balance");
        assert_eq!(parsed.description, "Balance below threshold: 12.50");
    }

    #[test]
    fn description_is_optional() {
        let parsed = "info:Synced".parse::<NotificationDescriptor>();
        assert!(matches!(parsed, Ok(d) if d.description.is_empty()));
    }

    #[test]
    fn rejects_blank_title_and_unknown_severity() {
        assert!(matches!(
            "info:  ".parse::<NotificationDescriptor>(),
            Err(NotifyError::InvalidDescriptor(_))
        ));
        assert!(matches!(
            "loud:Title".parse::<NotificationDescriptor>(),
            Err(NotifyError::InvalidDescriptor(_))
        ));
    }
}
