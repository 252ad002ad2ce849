//! CLI parse: clap types for disc-catalog. No behavior; definitions only.

use crate::sort::SortOrder;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// disc-catalog - searchable catalogs of storage volumes
#[derive(Parser)]
#[command(name = "disc-catalog")]
#[command(about = "Build, search and persist catalogs of storage volume directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog document path (overrides storage.document_path)
    #[arg(long, global = true)]
    pub document: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a volume and add it as a new catalog
    Scan {
        /// Volume root directory
        root: PathBuf,
        /// Catalog name (must not exist yet)
        #[arg(long)]
        name: String,
        /// Stamp nodes with filesystem modification times instead of scan time
        #[arg(long)]
        modified_times: bool,
    },
    /// List catalogs
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print a catalog as an indented outline
    Show {
        /// Catalog name
        name: String,
    },
    /// Sort one catalog, or every catalog, and save
    Sort {
        /// Sort key: name or date
        order: SortOrder,
        /// Only sort this catalog
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Find the first node with an exact name
    Find {
        /// Node name, case-sensitive
        query: String,
        /// Only search this catalog
        #[arg(long)]
        catalog: Option<String>,
        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Find files with names close to the query in every catalog
    Fuzzy {
        /// File name, typos allowed
        query: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Remove a catalog and save
    Remove {
        /// Catalog name
        name: String,
    },
}
