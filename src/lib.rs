pub mod cli;
pub mod config;
pub mod convert;
pub mod organize;
pub mod utils;

pub use config::{CollisionPolicy, Config, ToneMapOperator};
pub use convert::{BatchConverter, BatchSummary, ConversionOutcome, ToneMapCommand};
pub use organize::{group_by_prefix, prefix_of, OrganizeReport, PrefixGroup, PrefixOrganizer};
pub use utils::{CancelSignal, Error, JobPaths, Result};
