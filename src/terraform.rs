mod command;
mod state;

pub use command::{Action, TerraformCommand, validate_component};
pub use state::{STATE_FILE, StateResource, Status, TerraformState, read_state};
