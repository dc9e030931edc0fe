//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapconv")]
#[command(about = "Convert compressed idx/map/obj tile maps to JSON documents", long_about = None)]
pub struct Cli {
    /// Settings file (.toml or .json). Defaults to ./config.json if present,
    /// otherwise the user config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: 0 = errors only, 1-2 = warnings, 3 = info, 4+ = debug
    #[arg(short, long, global = true)]
    pub verbosity: Option<u8>,

    /// Same as --verbosity 0
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every complete map in the input folder
    #[command(visible_alias = "c")]
    Convert {
        /// Input folder (overrides settings)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output folder (overrides settings)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tileset tag written to every document (overrides settings)
        #[arg(short, long)]
        tileset: Option<String>,

        /// Worker threads (defaults to one per CPU)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List maps in the input folder and report incomplete ones
    #[command(visible_alias = "l")]
    List {
        /// Input folder (overrides settings)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Convert one map and print a summary without writing anything
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to the map, with or without the .idx/.map/.obj extension
        map: PathBuf,

        /// Tileset tag (overrides settings)
        #[arg(short, long)]
        tileset: Option<String>,

        /// Print the full JSON document
        #[arg(long)]
        json: bool,
    },

    /// Configure default settings
    Configure {
        /// Set default input folder
        #[arg(long)]
        input: Option<PathBuf>,

        /// Set default output folder
        #[arg(long)]
        output: Option<PathBuf>,

        /// Set default tileset tag
        #[arg(long)]
        tileset: Option<String>,

        /// Set default verbosity
        #[arg(long = "set-verbosity")]
        set_verbosity: Option<u8>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
