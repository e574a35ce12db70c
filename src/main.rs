use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ghprofile::cli::Cli;
use ghprofile::github::GitHubClient;
use ghprofile::logging::init_tracing;
use ghprofile::query::RequestClient;
use ghprofile::ui::app::App;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Everything that can fail on bad input happens before the terminal is touched
    let route = cli.initial_route()?;
    let config = cli.load_config()?;

    init_tracing(&config.logging)?;
    tracing::info!(
        config = %cli.config_path().display(),
        api_url = %config.github.api_url,
        "Starting ghprofile"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("ghprofile-worker")
        .build()
        .context("Failed to start async runtime")?;

    let client: Arc<dyn RequestClient> = Arc::new(GitHubClient::new(&config.github)?);
    let mut app = App::new(client, runtime.handle().clone(), &config);
    app.navigate(route);

    ghprofile::ui::run(&mut app, config.ui.tick_rate(), runtime.handle())
        .context("Terminal UI failed")?;

    drop(app);
    runtime.shutdown_timeout(std::time::Duration::from_millis(500));
    tracing::info!("Exited");
    Ok(())
}
