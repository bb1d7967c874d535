use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("synzy error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = synzy_config::SynzyConfig::load_with_dotenv().context("failed to load configuration")?;

    if let cli::Commands::Config { action } = &cli.command {
        return commands::config::handle(action, &config, &flags);
    }

    let ctx = context::AppContext::init(config, &flags)?;
    commands::dispatch::dispatch(cli.command, &ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SYNZY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
