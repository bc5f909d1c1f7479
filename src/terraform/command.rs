use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::TfError;

/// Terraform subcommands that run against a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Output,
    Plan,
    Apply,
    Destroy,
}

impl Action {
    pub fn subcommand(&self) -> &'static str {
        match self {
            Action::Output => "output",
            Action::Plan => "plan",
            Action::Apply => "apply",
            Action::Destroy => "destroy",
        }
    }

    pub fn supports_auto_approve(&self) -> bool {
        matches!(self, Action::Apply | Action::Destroy)
    }
}

/// Checks that `component` names an existing directory.
pub fn validate_component(component: &str) -> Result<PathBuf, TfError> {
    let path = PathBuf::from(component);

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TfError::ComponentNotFound(component.to_string()));
        }
        Err(e) => return Err(TfError::Io(e)),
    };

    if !metadata.is_dir() {
        return Err(TfError::NotADirectory(component.to_string()));
    }

    Ok(path)
}

/// A single terraform invocation inside a component directory.
#[derive(Debug, Clone)]
pub struct TerraformCommand {
    program: String,
    action: Action,
    dir: PathBuf,
    auto_approve: bool,
    extra_args: Vec<String>,
}

impl TerraformCommand {
    pub fn new(program: impl Into<String>, action: Action, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            action,
            dir: dir.into(),
            auto_approve: false,
            extra_args: Vec::new(),
        }
    }

    /// Ignored for actions that never prompt.
    pub fn auto_approve(mut self, yes: bool) -> Self {
        self.auto_approve = yes && self.action.supports_auto_approve();
        self
    }

    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Arguments passed to the executable, subcommand first.
    pub fn args(&self) -> Vec<&str> {
        let mut args = vec![self.action.subcommand()];
        if self.auto_approve {
            args.push("-auto-approve");
        }
        args.extend(self.extra_args.iter().map(String::as_str));
        args
    }

    /// Runs terraform with inherited stdio and waits for it. Returns the
    /// exit code the tool itself should exit with.
    pub fn run(&self) -> Result<u8, TfError> {
        let args = self.args();
        tracing::info!(
            program = %self.program,
            dir = %self.dir.display(),
            args = ?args,
            "running terraform"
        );

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    TfError::TerraformNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    TfError::Spawn {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        let code = exit_code(status);
        if code != 0 {
            tracing::warn!(code, "terraform exited with a failure");
        }
        Ok(code)
    }
}

fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(1);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(1);
        }
    }

    1
}
