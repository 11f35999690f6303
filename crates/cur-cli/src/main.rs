use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("cur error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = cur_config::CuratorConfig::load_with_dotenv()?;
    if let Some(dir) = &cli.state_dir {
        config.general.set_state_dir(dir);
    }

    match cli.command {
        cli::Commands::Run => commands::run::handle(&config).await,
        cli::Commands::Init => commands::init::handle(&config).await,
        cli::Commands::Status => commands::status::handle(&config),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CURATOR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
