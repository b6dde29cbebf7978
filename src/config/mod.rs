pub mod loader;
pub mod types;

pub use loader::{Config, ConfigOverrides};
pub use types::*;
