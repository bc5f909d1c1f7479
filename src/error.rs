use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TfError {
    #[error("Component '{0}' not found")]
    ComponentNotFound(String),

    #[error("Component '{0}' is not a folder")]
    NotADirectory(String),

    #[error(
        "We found more than {limit} files in the subdirectories, maybe you should try to run the command on a subdirectory with less files"
    )]
    TooManyFiles { limit: usize },

    #[error("could not run '{program}': executable not found")]
    TerraformNotFound { program: String },

    #[error("could not walk '{}': {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("could not read the terraform.tfstate of component '{component}': {source}")]
    ReadState {
        component: String,
        #[source]
        source: io::Error,
    },

    #[error("could not parse the terraform.tfstate of component '{component}': {source}")]
    ParseState {
        component: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("could not render the status report: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TfError {
    /// User errors are expected under normal use and carry an actionable
    /// message. Everything else is an internal error.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TfError::ComponentNotFound(_)
                | TfError::NotADirectory(_)
                | TfError::TooManyFiles { .. }
                | TfError::TerraformNotFound { .. }
        )
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_user_error() { 1 } else { 2 }
    }
}
