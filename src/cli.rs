mod args;

pub use args::{ApproveArgs, Cli, Command, ComponentArgs, GlobalArgs, OutputFormat, StatusArgs};
