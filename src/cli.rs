//! CLI domain: parse, route, help, output, and presentation only.
//! No catalog logic lives here; a single route table dispatches to the store.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::CatalogListRow;
pub use route::RunContext;
