use std::{io, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use music_library::{cli::{commands, Cli}, utils::config::Config};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("{:#}", err).red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("Could not load the configuration from {}", cli.config.display()))?;

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    commands::run(cli.command, &config, &mut input, &mut out)?;

    Ok(())
}
