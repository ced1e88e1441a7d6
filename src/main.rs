use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use route_walker::cli::Cli;
use route_walker::{app, headless, Config, SceneStatus};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    info!("Route {} -> {} ({})", config.origin, config.destination, config.mode);

    if config.headless {
        match headless::run(&config, &runtime)? {
            SceneStatus::Failed(reason) => bail!("route unavailable: {reason}"),
            status => info!("Finished: {}", status.label()),
        }
        return Ok(());
    }

    app::run(config, runtime.handle().clone())
}
