mod cli;
mod commands;
mod config;
mod scan;

use anyhow::Result;
use clap::Parser;
use config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = Settings::locate(cli.config.as_deref())?;
    let mut settings = Settings::load_from(&settings_path)?;
    if cli.quiet {
        settings.verbosity = 0;
    } else if let Some(verbosity) = cli.verbosity {
        settings.verbosity = verbosity;
    }

    init_logging(settings.verbosity);
    tracing::debug!("Using settings from {}", settings_path.display());

    match cli.command {
        Commands::Convert {
            input,
            output,
            tileset,
            jobs,
            pretty,
        } => {
            let input = input.unwrap_or_else(|| settings.folders.input.clone());
            let output = output.unwrap_or_else(|| settings.folders.output.clone());
            let options = settings.options(tileset.as_deref());
            commands::convert::handle(&input, &output, &options, jobs, pretty)?;
        }

        Commands::List { input } => {
            let input = input.unwrap_or_else(|| settings.folders.input.clone());
            commands::list::handle(&input)?;
        }

        Commands::Inspect { map, tileset, json } => {
            let options = settings.options(tileset.as_deref());
            commands::inspect::handle(&map, &options, json)?;
        }

        Commands::Configure {
            input,
            output,
            tileset,
            set_verbosity,
            show,
        } => {
            let changes = commands::configure::Changes {
                input,
                output,
                tileset,
                verbosity: set_verbosity,
            };
            commands::configure::handle(&settings_path, changes, show)?;
        }
    }

    Ok(())
}

/// Filter directive for a verbosity level
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 | 2 => "warn",
        3 => "info",
        _ => "debug",
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the verbosity
fn init_logging(verbosity: u8) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level_for(verbosity).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
