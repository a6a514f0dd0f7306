//! binwrap - native binaries for npm packages
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Two entry points share this crate:
//!
//! - `binwrap-provision` runs as the package's `postinstall` script. It
//!   downloads the release asset for the package version and installs it
//!   as `dist/<binary>`.
//! - `binwrap-launch` is the package's `bin` entry. It forwards every
//!   invocation to `dist/<binary>` and exits with the child's status.
//!
//! # Package Layout
//!
//! ```text
//! <package-root>/
//! ├── package.json    # version, repository, "binwrap" block
//! ├── bin/            # binwrap-launch
//! └── dist/           # provisioned executable
//! ```

pub mod cmd;
pub mod ui;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter for both binaries.
///
/// `RUST_LOG` is left alone so it reaches the wrapped binary untouched.
pub const LOG_ENV: &str = "BINWRAP_LOG";

#[derive(Debug, Parser)]
#[command(name = "binwrap-provision")]
#[command(
    author,
    version,
    about = "Download and install the native binary for an npm package"
)]
pub struct Cli {
    /// Directory containing package.json
    #[arg(long, env = "BINWRAP_PACKAGE_ROOT", default_value = ".")]
    pub package_root: PathBuf,

    /// Scheme and host serving release assets (overrides package.json)
    #[arg(long, env = "BINWRAP_RELEASE_ORIGIN")]
    pub origin: Option<String>,

    /// Show what would happen without making changes
    #[arg(long)]
    pub dry_run: bool,
}

/// Install the stderr log subscriber, filtered by `BINWRAP_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
