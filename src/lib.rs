//! tf - per-component terraform dispatcher
//!
//! Finds terraform components (directories holding a `main.tf`) below a
//! root, reports whether each one is applied or destroyed, and runs
//! terraform inside a single component with the terminal passed through.

pub mod cli;
pub mod commands;
pub mod component;
pub mod error;
pub mod output;
pub mod terraform;

pub use component::{Component, ComponentReport, DiscoverConfig, discover};
pub use error::TfError;
pub use terraform::{Action, Status, TerraformCommand};
