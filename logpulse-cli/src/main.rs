mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use tracing::{error, info};

use logpulse_core::config::LogPulseConfig;

use cli::{Cli, Commands};
use error::CliError;
use logging::LogTarget;
use output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match LogPulseConfig::load_or_default(&cli.config).await {
        Ok(config) => config,
        // `config validate` reports the load error itself
        Err(_) if matches!(cli.command, Commands::Config(_)) => LogPulseConfig::default(),
        Err(e) => {
            let err = CliError::from(e);
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    };
    if let Err(e) = logging::apply_level_override(&mut config, cli.log_level.as_deref()) {
        let err = CliError::from(e);
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }

    let interactive = matches!(cli.command, Commands::Dashboard(_));
    let guard = match logging::init_tracing(
        &config.general,
        LogTarget::resolve(&config.general, interactive),
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };

    logpulse_core::metrics::describe_all();
    info!(config = %cli.config.display(), "logpulse starting");

    let writer = OutputWriter::new(cli.output);
    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config, &writer).await,
        Commands::Chart(args) => commands::chart::execute(args, &config, &writer).await,
        Commands::Dashboard(args) => commands::dashboard::execute(args, &config).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        let code = e.exit_code();
        eprintln!("error: {e}");
        // flush the file writer before exiting
        drop(guard);
        std::process::exit(code);
    }
}
