use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::types::{Icon, Severity};

use super::defaults::{
    default_error_timeout, default_icon, default_info_timeout, default_max_visible,
    default_queue_bound, default_success_timeout, default_warning_timeout,
};
use super::env::{Lookup, env_bool, env_duration, env_parse, env_string};
use super::{AutoDismiss, Config, HumantimeDuration, MAX_VISIBLE_BOUNDS, ToastSettings};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    load_with_env(path, None)
}

/// Like [`load`], reading `TOASTLINE__*` keys from `env` instead of the
/// process environment when given.
pub(super) fn load_with_env(
    path: impl AsRef<Path>,
    env: Option<::config::Map<String, String>>,
) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOASTLINE")
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toast: RawToast,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToast {
    #[serde(default = "default_max_visible")]
    pub(super) max_visible: usize,
    #[serde(default = "default_queue_bound")]
    pub(super) queue_bound: usize,
    #[serde(default)]
    pub(super) sticky: bool,
    #[serde(default = "default_success_timeout")]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) success_timeout: Option<Duration>,
    #[serde(default = "default_info_timeout")]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) info_timeout: Option<Duration>,
    #[serde(default = "default_warning_timeout")]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) warning_timeout: Option<Duration>,
    #[serde(default = "default_error_timeout")]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) error_timeout: Option<Duration>,
    #[serde(default = "default_icon")]
    pub(super) default_icon: String,
}

impl Default for RawToast {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            queue_bound: default_queue_bound(),
            sticky: false,
            success_timeout: default_success_timeout(),
            info_timeout: default_info_timeout(),
            warning_timeout: default_warning_timeout(),
            error_timeout: default_error_timeout(),
            default_icon: default_icon(),
        }
    }
}

impl RawConfig {
    pub(super) fn apply_env_overrides(
        &mut self,
        lookup: Lookup<'_>,
    ) -> std::result::Result<(), ConfigError> {
        let toast = &mut self.toast;
        if let Some(max_visible) = env_parse::<usize>(lookup, "TOAST_MAX_VISIBLE")? {
            toast.max_visible = max_visible;
        }
        if let Some(queue_bound) = env_parse::<usize>(lookup, "TOAST_QUEUE_BOUND")? {
            toast.queue_bound = queue_bound;
        }
        if let Some(sticky) = env_bool(lookup, "TOAST_STICKY")? {
            toast.sticky = sticky;
        }
        if let Some(timeout) = env_duration(lookup, "TOAST_TIMEOUT")? {
            toast.success_timeout = Some(timeout);
            toast.info_timeout = Some(timeout);
            toast.warning_timeout = Some(timeout);
            toast.error_timeout = Some(timeout);
        }
        if let Some(icon) = env_string(lookup, "TOAST_ICON")? {
            toast.default_icon = icon;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let toast = self.toast;

        if !MAX_VISIBLE_BOUNDS.contains(&toast.max_visible) {
            return Err(ConfigError::InvalidField {
                field: "toast.max_visible",
                message: format!(
                    "expected between {} and {}, got {}",
                    MAX_VISIBLE_BOUNDS.start(),
                    MAX_VISIBLE_BOUNDS.end(),
                    toast.max_visible
                ),
            }
            .into());
        }
        if toast.queue_bound == 0 {
            return Err(ConfigError::InvalidField {
                field: "toast.queue_bound",
                message: "queue bound must be greater than zero".to_string(),
            }
            .into());
        }

        let timeouts = [
            ("toast.success_timeout", Severity::Success, toast.success_timeout),
            ("toast.info_timeout", Severity::Info, toast.info_timeout),
            ("toast.warning_timeout", Severity::Warning, toast.warning_timeout),
            ("toast.error_timeout", Severity::Error, toast.error_timeout),
        ];
        let mut auto_dismiss = AutoDismiss::none();
        for (field, severity, timeout) in timeouts {
            if timeout.is_some_and(|d| d.is_zero()) {
                return Err(ConfigError::InvalidField {
                    field,
                    message: "timeout must be greater than zero".to_string(),
                }
                .into());
            }
            auto_dismiss.set(severity, timeout);
        }

        let default_icon = toast
            .default_icon
            .parse::<Icon>()
            .map_err(|message| ConfigError::InvalidField {
                field: "toast.default_icon",
                message,
            })?;

        Ok(Config {
            toast: ToastSettings {
                max_visible: toast.max_visible,
                queue_bound: toast.queue_bound,
                sticky: toast.sticky,
                auto_dismiss,
                default_icon,
            },
        })
    }
}
