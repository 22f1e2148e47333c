use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

/// Source of override values; the process environment outside tests.
pub(super) type Lookup<'a> = &'a dyn Fn(&'static str) -> Result<Option<String>, ConfigError>;

pub(super) fn process_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(ConfigError::Other(format!("{key}: {err}"))),
    }
}

pub(super) fn env_string(
    lookup: Lookup<'_>,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    Ok(lookup(key)?.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

pub(super) fn env_parse<T>(lookup: Lookup<'_>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_string(lookup, key)?
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|err| ConfigError::InvalidField {
                    field: key,
                    message: err.to_string(),
                })
        })
        .transpose()
}

pub(super) fn env_bool(lookup: Lookup<'_>, key: &'static str) -> Result<Option<bool>, ConfigError> {
    env_string(lookup, key)?
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Ok(true),
            "0" | "false" | "no" | "n" | "off" => Ok(false),
            other => Err(ConfigError::InvalidField {
                field: key,
                message: format!("expected a boolean, got {other:?}"),
            }),
        })
        .transpose()
}

pub(super) fn env_duration(
    lookup: Lookup<'_>,
    key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    env_string(lookup, key)?
        .map(|value| {
            parse_duration(&value).map_err(|err| ConfigError::InvalidField {
                field: key,
                message: err.to_string(),
            })
        })
        .transpose()
}
