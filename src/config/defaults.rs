use std::time::Duration;

use crate::types::Severity;

pub(super) const fn default_max_visible() -> usize {
    3
}

pub(super) const fn default_queue_bound() -> usize {
    64
}

pub(super) fn default_icon() -> String {
    "🔔".to_string()
}

pub(super) const fn default_success_timeout() -> Option<Duration> {
    Severity::Success.default_auto_dismiss()
}

pub(super) const fn default_info_timeout() -> Option<Duration> {
    Severity::Info.default_auto_dismiss()
}

pub(super) const fn default_warning_timeout() -> Option<Duration> {
    Severity::Warning.default_auto_dismiss()
}

pub(super) const fn default_error_timeout() -> Option<Duration> {
    Severity::Error.default_auto_dismiss()
}
