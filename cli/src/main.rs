mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{
    handle_add, handle_generate, handle_list, handle_measure, handle_tags, handle_ui, Cli,
    Commands,
};
use pipegeo_config::{Config, ErrorFormatter, LogFormat};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match commands::utils::load_config(
        cli.config.as_deref(),
        cli.store.clone(),
        cli.remote.clone(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", ErrorFormatter::from(e));
            std::process::exit(2);
        }
    };

    init_tracing(&config);
    debug!(store = %config.store.path.display(), remote = ?config.remote.api_base, "config loaded");

    match cli.command {
        Commands::Generate { count, seed } => {
            handle_generate(&config, count, seed)?;
        }
        Commands::List { tag, limit, json } => {
            handle_list(&config, tag, limit, json)?;
        }
        Commands::Add {
            name,
            start,
            end,
            color,
            tags,
        } => {
            handle_add(&config, name, start, end, color, tags)?;
        }
        Commands::Tags => {
            handle_tags(&config)?;
        }
        Commands::Measure { ids, json } => {
            handle_measure(&config, ids, json)?;
        }
        Commands::Ui { limit } => {
            handle_ui(&config, limit)?;
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `log.filter` from config.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.log.ansi);

    let _ = match config.log.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
