mod args;
mod commands;
mod config;
mod logging;
mod navigator;
mod render;
mod token_file;
mod transport;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use args::Cli;
use config::Config;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    logging::init_logging().context("initializing logging")?;

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    let gw = commands::gateway(&config);
    tracing::debug!(
        api_url = %config.api_url,
        token_file = %gw.tokens().path().display(),
        "configuration loaded"
    );
    commands::execute(&gw, &config, cli.command)
}
