pub mod error;
pub mod io;
pub mod launch;
pub mod paths;
pub mod plan;
pub mod provision;
pub mod repo;

pub use error::ProvisionError;
pub use paths::*;
pub use plan::{PlanInputs, ProvisionPlan};

/// User Agent string for release downloads
pub const USER_AGENT: &str = concat!("binwrap/", env!("CARGO_PKG_VERSION"));
