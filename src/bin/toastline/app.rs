use std::path::PathBuf;
use std::time::Duration;

use toastline::Result;
use toastline::config::{Config, MAX_VISIBLE_BOUNDS};
use toastline::error::{ConfigError, Error as ToastError};
use toastline::stack::{NotificationId, ToastStack};
use toastline::telemetry::init_tracing;
use toastline::toast::Target;
use tokio::signal;
use tokio::time::{Instant, MissedTickBehavior, interval, sleep_until};
use tracing::{info, warn};

use super::cli::Cli;
use super::render::Renderer;

const DEFAULT_CONFIG: &str = "toastline.toml";
const FRAME: Duration = Duration::from_millis(16);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    // Le fichier par défaut est optionnel, un chemin explicite doit exister.
    let config_path = match cli.config.clone() {
        Some(path) => {
            std::fs::metadata(&path).map_err(|source| ConfigError::FileRead {
                path: path.clone(),
                source,
            })?;
            path
        }
        None => PathBuf::from(DEFAULT_CONFIG),
    };
    let mut config = Config::from_env_and_file(&config_path)?;

    if let Some(max_visible) = cli.max_visible {
        if !MAX_VISIBLE_BOUNDS.contains(&max_visible) {
            return Err(ToastError::from(ConfigError::InvalidField {
                field: "cli.max_visible",
                message: format!(
                    "value must be between {} and {}",
                    MAX_VISIBLE_BOUNDS.start(),
                    MAX_VISIBLE_BOUNDS.end()
                ),
            }));
        }
        config.toast.max_visible = max_visible;
    }
    if cli.sticky {
        config.toast.sticky = true;
    }

    if cli.notifications.is_empty() {
        info!("no notification requested, nothing to show");
        return Ok(());
    }

    let icon = cli
        .icon
        .clone()
        .unwrap_or_else(|| config.toast.default_icon.clone());
    let mut stack = ToastStack::new(config.toast);
    for descriptor in cli.notifications {
        if let Err(err) = stack.push(descriptor.with_icon(icon.clone())) {
            warn!(error = %err, "notification not shown");
        }
    }

    let mut renderer = Renderer::stdout();
    let mut frame = interval(FRAME);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let click_at = cli.click_after.map(|delay| Instant::now() + delay);
    let mut click_pending = click_at.is_some();
    let click_deadline = click_at.unwrap_or_else(Instant::now);

    while !stack.is_empty() {
        tokio::select! {
            biased;
            _ = signal::ctrl_c() => {
                info!("shutdown signal received, clearing toasts");
                stack.clear();
                break;
            }
            removed = stack.next_removed() => {
                if let Some(id) = removed {
                    renderer.removed(id)?;
                }
            }
            () = sleep_until(click_deadline), if click_pending => {
                click_pending = false;
                let ids: Vec<NotificationId> = stack.visible().map(|t| t.id).collect();
                info!(count = ids.len(), "clicking visible toasts");
                for id in ids {
                    stack.click(id, Target::Body);
                }
            }
            _ = frame.tick() => {
                renderer.frame(&stack)?;
            }
        }
    }

    Ok(())
}
