use std::env;
use std::io::Write;
use std::path::Path;

use crate::cli::{Cli, Command, ComponentArgs, GlobalArgs, StatusArgs};
use crate::component::{self, ComponentReport, DiscoverConfig};
use crate::error::TfError;
use crate::output;
use crate::terraform::{self, Action, TerraformCommand};

/// Runs the parsed command line and returns the process exit code.
pub fn execute(cli: Cli, out: &mut impl Write) -> Result<u8, TfError> {
    let Cli { global, command } = cli;

    match command {
        Command::Status(args) => {
            status(&args, &global, out)?;
            Ok(0)
        }
        Command::Output(args) => run_component(Action::Output, args, false, &global),
        Command::Plan(args) => run_component(Action::Plan, args, false, &global),
        Command::Apply(args) => run_component(Action::Apply, args.target, args.yes, &global),
        Command::Destroy(args) => run_component(Action::Destroy, args.target, args.yes, &global),
    }
}

/// Classifies every component under `root`. Fails as a whole if any state
/// file is unreadable.
pub fn collect_reports(
    root: &Path,
    config: &DiscoverConfig,
) -> Result<Vec<ComponentReport>, TfError> {
    let components = component::discover(root, config)?;

    components
        .into_iter()
        .map(|component| {
            let state = terraform::read_state(&root.join(&component.path), &component.name)?;
            Ok(ComponentReport {
                status: state.status(),
                resources: state.resources.len(),
                component: component.name,
            })
        })
        .collect()
}

fn status(args: &StatusArgs, global: &GlobalArgs, out: &mut impl Write) -> Result<(), TfError> {
    let root = match &args.dir {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };
    let config = DiscoverConfig {
        max_files: global.max_files,
    };

    let reports = collect_reports(&root, &config)?;
    let rendered = output::render(&reports, args.format)?;
    if !rendered.is_empty() {
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}

fn run_component(
    action: Action,
    args: ComponentArgs,
    yes: bool,
    global: &GlobalArgs,
) -> Result<u8, TfError> {
    let dir = terraform::validate_component(&args.component)?;

    TerraformCommand::new(global.terraform.clone(), action, dir)
        .auto_approve(yes)
        .extra_args(args.terraform_args)
        .run()
}
