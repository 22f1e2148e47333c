use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Success, Self::Info, Self::Warning, Self::Error];

    /// Presentation tone used to pick the toast background.
    #[must_use]
    pub const fn tone(self) -> &'static str {
        match self {
            Self::Success => "green",
            Self::Info => "blue",
            Self::Warning => "amber",
            Self::Error => "red",
        }
    }

    /// Auto-dismiss delay when the configuration does not override it.
    /// Errors stay until the user closes them.
    #[must_use]
    pub const fn default_auto_dismiss(self) -> Option<Duration> {
        match self {
            Self::Success | Self::Info => Some(Duration::from_secs(3)),
            Self::Warning => Some(Duration::from_secs(5)),
            Self::Error => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" | "ok" => Ok(Self::Success),
            "info" | "information" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warning),
            "error" | "err" | "danger" => Ok(Self::Error),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Symbolic icon shown at the left of a toast.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Icon {
    /// Rendered as-is, usually an emoji.
    Glyph(String),
    /// Icon font class such as `fa-wallet`.
    FontClass(String),
}

impl Icon {
    const FONT_CLASS_PREFIX: &'static str = "fa-";
}

impl Default for Icon {
    fn default() -> Self {
        Self::Glyph("🔔".to_string())
    }
}

impl From<&str> for Icon {
    fn from(value: &str) -> Self {
        if value.starts_with(Self::FONT_CLASS_PREFIX) {
            Self::FontClass(value.to_string())
        } else {
            Self::Glyph(value.to_string())
        }
    }
}

impl FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("icon cannot be empty".to_string());
        }
        Ok(Self::from(trimmed))
    }
}

impl Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Glyph(glyph) => f.write_str(glyph),
            Self::FontClass(class) => write!(f, "<{class}>"),
        }
    }
}
