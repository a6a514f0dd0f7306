//! Shared types for binwrap: platforms, the package descriptor and
//! per-package wrapper configuration.

pub mod arch;
pub mod config;
pub mod descriptor;
pub mod platform;

// Re-exports
pub use arch::*;
pub use config::{Branding, DEFAULT_RELEASE_ORIGIN, MarkerVar, WrapperConfig};
pub use descriptor::{DescriptorError, MANIFEST_FILE, PackageDescriptor, Repository};
pub use platform::Platform;
