use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TfError;

/// Local state file terraform writes next to `main.tf`.
pub const STATE_FILE: &str = "terraform.tfstate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Applied,
    Destroyed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Applied => f.write_str("applied"),
            Status::Destroyed => f.write_str("destroyed"),
        }
    }
}

/// The part of a tfstate document this tool looks at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerraformState {
    #[serde(default)]
    pub resources: Vec<StateResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateResource {
    #[serde(rename = "type", default)]
    pub resource_type: String,
}

impl TerraformState {
    pub fn status(&self) -> Status {
        if self.resources.is_empty() {
            Status::Destroyed
        } else {
            Status::Applied
        }
    }
}

/// Reads `<dir>/terraform.tfstate`. A missing file reads as an empty
/// state, which classifies as destroyed. A file that cannot be read or
/// parsed is an internal error.
pub fn read_state(dir: &Path, component: &str) -> Result<TerraformState, TfError> {
    let path = dir.join(STATE_FILE);

    let body = match fs::read(&path) {
        Ok(body) => body,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(component, "no state file");
            return Ok(TerraformState::default());
        }
        Err(source) => {
            return Err(TfError::ReadState {
                component: component.to_string(),
                source,
            });
        }
    };

    let state: TerraformState =
        serde_json::from_slice(&body).map_err(|source| TfError::ParseState {
            component: component.to_string(),
            source,
        })?;

    tracing::debug!(component, resources = state.resources.len(), "state loaded");
    Ok(state)
}
