pub mod args;
pub mod prompt;

pub use args::CliArgs;
pub use prompt::{confirm_organize, is_affirmative};
