mod cli;
mod handlers;
mod input;
mod output;

use boards_core::AppConfig;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("BOARDS_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        let filter = EnvFilter::try_from_env("BOARDS_LOG")
            .or_else(|_| EnvFilter::try_new(config.effective_log_filter()))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    init_tracing(&config)?;

    let cli = Cli::parse();
    let format = OutputFormat {
        pretty: cli.pretty || config.effective_pretty_output(),
    };

    let result = match cli.command {
        Commands::Diff(args) => handlers::diff::handle(format, args),
        Commands::Filter(args) => handlers::filter::handle(format, args),
        Commands::Suggest(args) => handlers::suggest::handle(format, args),
        Commands::Group(args) => handlers::group::handle(format, args),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "boards", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::debug!(error = ?err, "Command failed");
        format.error(&format!("{:#}", err));
    }
    Ok(())
}
