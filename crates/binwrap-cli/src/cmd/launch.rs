//! Launch command: the package's `bin` entry.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

use binwrap_core::launch::{self, LaunchError};
use binwrap_core::paths;
use binwrap_schema::{Branding, PackageDescriptor};

use crate::ui::{Output, render_error};

/// Exit code when the child could not be started at all.
pub const EXIT_SPAWN_FAILED: i32 = 127;

/// The installed package the launcher belongs to.
struct Package {
    root: PathBuf,
    branding: Branding,
}

impl Package {
    fn locate() -> Result<Self> {
        let root = paths::launcher_package_root().context("Could not locate package root")?;
        let descriptor = PackageDescriptor::load(&root)?;
        Ok(Self {
            branding: Branding::from_descriptor(&descriptor)?,
            root,
        })
    }

    fn binary(&self) -> PathBuf {
        paths::binary_path(&self.root, &self.branding.binary_name)
    }
}

/// Run the provisioned binary with `args` and return the code to exit with.
pub fn launch(args: Vec<OsString>) -> i32 {
    let package = match Package::locate() {
        Ok(package) => package,
        Err(e) => {
            Output::anonymous().error(&render_error(&e));
            return 1;
        }
    };
    let output = Output::new(&package.branding);

    match launch::launch(&package.binary(), args, package.branding.marker.as_ref()) {
        Ok(status) => launch::exit_code(status),
        Err(LaunchError::NotProvisioned { path }) => {
            tracing::debug!(path = %path.display(), "Binary missing");
            output.error("Native binary not found. The postinstall step may have failed.");
            output.error("Try reinstalling or check your network, then run:");
            output.hint(&package.branding.remediation());
            1
        }
        Err(e @ LaunchError::Spawn { .. }) => {
            output.error(&e.to_string());
            EXIT_SPAWN_FAILED
        }
    }
}
