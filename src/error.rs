use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("failed to render toasts")]
    Render(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification queue is full ({capacity} pending)")]
    QueueFull { capacity: usize },
    #[error("invalid notification descriptor: {0}")]
    InvalidDescriptor(String),
}

impl Error {
    /// Whether the caller may retry the same operation later.
    ///
    /// A full queue drains as mounted toasts complete; everything else is
    /// permanent.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Notify(NotifyError::QueueFull { .. }))
    }
}
