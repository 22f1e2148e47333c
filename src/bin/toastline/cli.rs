use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use toastline::toast::NotificationDescriptor;
use toastline::types::Icon;

#[derive(Parser, Debug)]
#[command(author, version, about = "Transient notifications for the expense tracker", long_about = None)]
pub struct Cli {
    /// Chemin du fichier de configuration TOML.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Notification à afficher, au format "SEVERITE:TITRE:DESCRIPTION" (répétable).
    #[arg(long = "notify", value_name = "SPEC", value_parser = parse_descriptor)]
    pub notifications: Vec<NotificationDescriptor>,

    /// Icône des notifications passées par --notify (emoji ou classe "fa-...").
    #[arg(long, value_name = "ICON", value_parser = clap::value_parser!(Icon))]
    pub icon: Option<Icon>,

    /// Clique sur chaque notification visible après ce délai (ex. "1s").
    #[arg(long, value_parser = parse_duration)]
    pub click_after: Option<Duration>,

    /// Nombre maximal de notifications affichées simultanément.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub max_visible: Option<usize>,

    /// Désactive la fermeture automatique.
    #[arg(long, action = ArgAction::SetTrue)]
    pub sticky: bool,

    /// Utilise un layer JSON pour les logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Filtre de logs explicite (ex. "toastline=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_descriptor(raw: &str) -> Result<NotificationDescriptor, String> {
    raw.parse::<NotificationDescriptor>()
        .map_err(|err| err.to_string())
}
