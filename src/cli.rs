//! CLI domain: parse, route, output and presentation only.
//! No pipeline logic; the route table dispatches to the library API.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{format_config_text, format_task_list_json, format_task_list_text};
pub use route::RunContext;
