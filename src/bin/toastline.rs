#[path = "toastline/app.rs"]
mod app;
#[path = "toastline/cli.rs"]
mod cli;
#[path = "toastline/render.rs"]
mod render;

use std::error::Error as StdError;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse_args();
    match app::run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            std::process::ExitCode::from(1)
        }
    }
}

fn report_error(err: &toastline::error::Error) {
    tracing::error!(error = %err, "toastline terminated with an error");
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(inner) = source {
        eprintln!("  caused by: {inner}");
        source = inner.source();
    }
}
