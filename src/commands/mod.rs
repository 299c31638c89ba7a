//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod check;
pub mod models;
pub mod profile;
pub mod translate;
pub mod utils;

// Re-export main command functions
pub use check::execute_check;
pub use models::{CheckArgs, ProfileArgs, TranslateArgs};
pub use profile::{execute_profile, validate_args};
pub use translate::execute_translate;
pub use utils::{display_schema, display_version, validate_profile_file};
