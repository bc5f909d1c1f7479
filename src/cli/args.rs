use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::component::DEFAULT_MAX_FILES;

#[derive(Parser, Debug)]
#[command(name = "tf", author, version, about, arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parses an argument vector, accepting the single-dash `-yes` flag.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Terraform executable, looked up on PATH unless it contains a separator
    #[arg(
        long,
        global = true,
        env = "TF_COMPONENTS_TERRAFORM",
        default_value = "terraform"
    )]
    pub terraform: String,

    /// Give up scanning for components after this many filesystem entries
    #[arg(
        long,
        global = true,
        env = "TF_COMPONENTS_MAX_FILES",
        default_value_t = DEFAULT_MAX_FILES
    )]
    pub max_files: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get the status of all the components
    Status(StatusArgs),
    /// Run the 'output' of the component
    Output(ComponentArgs),
    /// Run the 'plan' of the component
    Plan(ComponentArgs),
    /// Run the 'apply' of the component
    Apply(ApproveArgs),
    /// Run the 'destroy' of the component
    Destroy(ApproveArgs),
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Directory to scan (defaults to the current directory)
    #[arg(long, short = 'C')]
    pub dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<component>\t<status>` per line, tab-aligned
    Text,
    /// Bordered table with resource counts
    Table,
    Json,
}

#[derive(clap::Args, Debug)]
pub struct ComponentArgs {
    /// Path to the component directory
    pub component: String,

    /// Extra arguments forwarded to terraform after `--`
    #[arg(last = true)]
    pub terraform_args: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ApproveArgs {
    #[command(flatten)]
    pub target: ComponentArgs,

    /// Skip interactive approval (`-yes` is the same as `-auto-approve`)
    #[arg(short = 'y', long = "yes", visible_alias = "auto-approve")]
    pub yes: bool,
}

/// Rewrites the legacy `-yes` flag to `--yes`. Anything after `--` belongs
/// to terraform and is left alone.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut forwarding = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if forwarding {
                return arg;
            }
            if arg == "--" {
                forwarding = true;
                return arg;
            }
            if arg == "-yes" {
                OsString::from("--yes")
            } else {
                arg
            }
        })
        .collect()
}
