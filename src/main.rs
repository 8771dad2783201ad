use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod clean;
mod cli;
mod config;
mod date;
mod dists;
mod metadata;
mod output;
mod paths;
mod remote;
mod staging;
#[cfg(test)]
mod test_support;
mod util;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_logging(args.command.verbose());

    match args.command {
        Command::Update(args) => workflow::run_update(args),
        Command::Clean(args) => workflow::run_clean(args),
        Command::Resolve(args) => workflow::run_resolve(args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
