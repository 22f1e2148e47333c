use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ToastError;
use crate::types::{Icon, Severity};

mod defaults;
mod duration;
mod env;
mod raw;

use duration::HumantimeDuration;

/// Accepted range for `toast.max_visible`, from the file, the environment or the CLI.
pub const MAX_VISIBLE_BOUNDS: RangeInclusive<usize> = 1..=10;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub toast: ToastSettings,
}

#[derive(Debug, Clone)]
pub struct ToastSettings {
    /// Toasts mounted at once; the rest wait in the queue.
    pub max_visible: usize,
    pub queue_bound: usize,
    /// Disables every auto-dismiss timer.
    pub sticky: bool,
    pub auto_dismiss: AutoDismiss,
    pub default_icon: Icon,
}

/// Auto-dismiss delay per severity. `None` means manual dismissal only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoDismiss([Option<Duration>; 4]);

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be read, parsed,
    /// when environment overrides are invalid, or when the resulting values
    /// fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides(&env::process_env)
            .map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

impl ToastSettings {
    /// Delay after which a mounted toast of `severity` is dismissed.
    #[must_use]
    pub const fn auto_dismiss_for(&self, severity: Severity) -> Option<Duration> {
        if self.sticky {
            None
        } else {
            self.auto_dismiss.get(severity)
        }
    }
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            max_visible: defaults::default_max_visible(),
            queue_bound: defaults::default_queue_bound(),
            sticky: false,
            auto_dismiss: AutoDismiss::default(),
            default_icon: Icon::default(),
        }
    }
}

impl AutoDismiss {
    #[must_use]
    pub const fn none() -> Self {
        Self([None; 4])
    }

    #[must_use]
    pub const fn get(&self, severity: Severity) -> Option<Duration> {
        self.0[Self::index(severity)]
    }

    pub const fn set(&mut self, severity: Severity, timeout: Option<Duration>) {
        self.0[Self::index(severity)] = timeout;
    }

    const fn index(severity: Severity) -> usize {
        match severity {
            Severity::Success => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
        }
    }
}

impl Default for AutoDismiss {
    fn default() -> Self {
        let mut table = Self::none();
        for severity in Severity::ALL {
            table.set(severity, severity.default_auto_dismiss());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::raw::{RawConfig, load_with_env};
    use super::{AutoDismiss, Config, ToastSettings};
    use crate::error::{ConfigError, Error};
    use crate::types::{Icon, Severity};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn build_with_env(vars: &[(&'static str, &'static str)]) -> crate::Result<Config> {
        let vars: HashMap<&'static str, &'static str> = vars.iter().copied().collect();
        let lookup = move |key: &'static str| -> Result<Option<String>, ConfigError> {
            Ok(vars.get(key).map(|v| (*v).to_string()))
        };
        let mut raw = RawConfig::default();
        raw.apply_env_overrides(&lookup)?;
        raw.validate_and_build()
    }

    #[test]
    fn defaults_follow_severity() {
        let config = match build_with_env(&[]) {
            Ok(config) => config,
            Err(err) => panic!("defaults should validate: {err}"),
        };
        assert_eq!(config.toast.max_visible, 3);
        assert_eq!(config.toast.auto_dismiss, AutoDismiss::default());
        assert_eq!(
            config.toast.auto_dismiss_for(Severity::Warning),
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.toast.auto_dismiss_for(Severity::Error), None);
    }

    #[test]
    fn global_timeout_override_applies_to_every_severity() {
        let config = match build_with_env(&[("TOAST_TIMEOUT", "2s"), ("TOAST_ICON", "fa-bell")]) {
            Ok(config) => config,
            Err(err) => panic!("override should validate: {err}"),
        };
        for severity in Severity::ALL {
            assert_eq!(
                config.toast.auto_dismiss_for(severity),
                Some(Duration::from_secs(2))
            );
        }
        assert_eq!(config.toast.default_icon, Icon::FontClass("fa-bell".into()));
    }

    #[test]
    fn sticky_disables_auto_dismiss() {
        let settings = ToastSettings {
            sticky: true,
            ..ToastSettings::default()
        };
        assert!(Severity::ALL.iter().all(|s| settings.auto_dismiss_for(*s).is_none()));
    }

    #[test]
    fn rejects_out_of_range_max_visible() {
        let err = build_with_env(&[("TOAST_MAX_VISIBLE", "0")]);
        assert!(matches!(
            err,
            Err(Error::Config(ConfigError::InvalidField {
                field: "toast.max_visible",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = build_with_env(&[("TOAST_TIMEOUT", "0s")]);
        assert!(matches!(
            err,
            Err(Error::Config(ConfigError::InvalidField {
                field: "toast.success_timeout",
                ..
            }))
        ));
    }

    struct ConfigFile(PathBuf);

    impl ConfigFile {
        fn write(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir()
                .join(format!("toastline-{}-{name}.toml", std::process::id()));
            std::fs::write(&path, contents).expect("write config file");
            Self(path)
        }
    }

    impl Drop for ConfigFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    const TOAST_FILE: &str = r#"
[toast]
max_visible = 2
success_timeout = "1s 500ms"
error_timeout = "9s"
"#;

    fn build_from(
        file: &ConfigFile,
        source: &[(&str, &str)],
        overrides: &[(&'static str, &'static str)],
    ) -> crate::Result<Config> {
        let source: ::config::Map<String, String> = source
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let overrides: HashMap<&'static str, &'static str> = overrides.iter().copied().collect();
        let lookup = move |key: &'static str| -> Result<Option<String>, ConfigError> {
            Ok(overrides.get(key).map(|v| (*v).to_string()))
        };
        let mut raw = load_with_env(&file.0, Some(source))?;
        raw.apply_env_overrides(&lookup)?;
        raw.validate_and_build()
    }

    #[test]
    fn toml_file_layer_is_read() {
        let file = ConfigFile::write("file-layer", TOAST_FILE);
        let config = build_from(&file, &[], &[]).expect("file should load");
        assert_eq!(config.toast.max_visible, 2);
        assert_eq!(
            config.toast.auto_dismiss_for(Severity::Success),
            Some(Duration::from_millis(1_500))
        );
        assert_eq!(
            config.toast.auto_dismiss_for(Severity::Error),
            Some(Duration::from_secs(9))
        );
        assert_eq!(
            config.toast.auto_dismiss_for(Severity::Warning),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn prefixed_env_source_overrides_file() {
        let file = ConfigFile::write("env-source", TOAST_FILE);
        let config = build_from(&file, &[("TOASTLINE__TOAST__MAX_VISIBLE", "4")], &[])
            .expect("env source should load");
        assert_eq!(config.toast.max_visible, 4);
        assert_eq!(
            config.toast.auto_dismiss_for(Severity::Error),
            Some(Duration::from_secs(9))
        );
    }

    #[test]
    fn explicit_overrides_win_over_file_and_env_source() {
        let file = ConfigFile::write("overrides", TOAST_FILE);
        let config = build_from(
            &file,
            &[("TOASTLINE__TOAST__MAX_VISIBLE", "4")],
            &[("TOAST_MAX_VISIBLE", "6"), ("TOAST_TIMEOUT", "750ms")],
        )
        .expect("overrides should validate");
        assert_eq!(config.toast.max_visible, 6);
        assert_eq!(
            config.toast.auto_dismiss_for(Severity::Error),
            Some(Duration::from_millis(750))
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = ConfigFile::write("malformed", "[toast]\nmax_visible = \"many\"\n");
        assert!(matches!(
            build_from(&file, &[], &[]),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = match Config::from_env_and_file("does/not/exist.toml") {
            Ok(config) => config,
            Err(err) => panic!("missing file is optional: {err}"),
        };
        assert!(config.toast.queue_bound > 0);
    }
}
