use std::path::{Component as PathComponent, Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::TfError;
use crate::terraform::Status;

/// Marker file that turns a directory into a component.
pub const MARKER_FILE: &str = "main.tf";

/// Walking the filesystem root by accident should fail fast instead of
/// scanning the whole disk.
pub const DEFAULT_MAX_FILES: usize = 1_000;

/// Name given to a component whose `main.tf` sits in the scan root itself.
pub const ROOT_COMPONENT: &str = ".";

#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    pub max_files: usize,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// A discovered component. `name` is for display; `path` is the real
/// directory relative to the scan root and is what gets read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub path: PathBuf,
}

/// One line of the `status` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentReport {
    pub component: String,
    pub status: Status,
    pub resources: usize,
}

/// Finds every directory under `root` that directly contains a `main.tf`.
///
/// Components are named by their path relative to `root`, joined with `/`.
/// Siblings are visited in file-name order. Every visited entry counts
/// towards `config.max_files`, including the root and unreadable entries;
/// going over the limit fails the whole walk with
/// [`TfError::TooManyFiles`].
pub fn discover(root: &Path, config: &DiscoverConfig) -> Result<Vec<Component>, TfError> {
    let mut components = Vec::new();
    let mut visited = 0usize;

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        visited += 1;
        if visited > config.max_files {
            tracing::warn!(
                root = %root.display(),
                limit = config.max_files,
                "too many files, aborting component discovery"
            );
            return Err(TfError::TooManyFiles {
                limit: config.max_files,
            });
        }

        let entry = entry.map_err(|source| TfError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_name() != MARKER_FILE || entry.file_type().is_dir() {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let Ok(relative) = dir.strip_prefix(root) else {
            continue;
        };

        let name = component_name(relative);
        tracing::debug!(component = %name, "found component");
        components.push(Component {
            name,
            path: relative.to_path_buf(),
        });
    }

    tracing::info!(
        root = %root.display(),
        visited,
        count = components.len(),
        "component discovery complete"
    );

    Ok(components)
}

fn component_name(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|part| match part {
            PathComponent::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ROOT_COMPONENT.to_string()
    } else {
        parts.join("/")
    }
}
