use std::io;
use std::process::ExitCode;

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use tf_components::TfError;
use tf_components::cli::Cli;
use tf_components::commands;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            let code = if err.use_stderr() { 1 } else { 0 };
            return Ok(ExitCode::from(code));
        }
    };

    let result = {
        let mut stdout = io::stdout().lock();
        commands::execute(cli, &mut stdout)
    };

    match result {
        Ok(code) => Ok(ExitCode::from(code)),
        Err(err) => Ok(ExitCode::from(report(&err))),
    }
}

fn report(err: &TfError) -> u8 {
    tracing::debug!(error = ?err, "command failed");
    if err.is_user_error() {
        println!("Error: {err}");
    } else {
        println!("Internal error: {err}");
    }
    err.exit_code()
}
