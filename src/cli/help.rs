//! CLI command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name recorded on the command span (e.g. "scan", "fuzzy").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Scan { .. } => "scan",
        Commands::List { .. } => "list",
        Commands::Show { .. } => "show",
        Commands::Sort { .. } => "sort",
        Commands::Find { .. } => "find",
        Commands::Fuzzy { .. } => "fuzzy",
        Commands::Remove { .. } => "remove",
    }
}

/// Whether the command rewrites the catalog document
pub fn is_mutating(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Scan { .. } | Commands::Sort { .. } | Commands::Remove { .. }
    )
}
