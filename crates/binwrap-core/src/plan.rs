//! The resolved inputs of one provisioning run.
//!
//! Everything the provisioner needs (host platform, release repository,
//! version, asset, destination) is gathered here once, up front, so the
//! download and install steps never consult the environment themselves.

use std::path::{Path, PathBuf};

use binwrap_schema::{Branding, PackageDescriptor, Platform};

use crate::error::ProvisionError;
use crate::paths;
use crate::repo::OwnerRepo;

/// Ambient values read at startup by the caller.
#[derive(Debug, Clone)]
pub struct PlanInputs {
    /// Directory containing `package.json`.
    pub package_root: PathBuf,
    /// Platform of the running process.
    pub host: Platform,
    /// Value of the branding's override variable, if set.
    pub repo_override: Option<String>,
    /// Release origin override (e.g. a mirror), if set.
    pub origin_override: Option<String>,
}

/// A fully-resolved provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPlan {
    pub host: Platform,
    pub required: Platform,
    pub repo: OwnerRepo,
    pub version: semver::Version,
    pub origin: String,
    pub asset_name: String,
    pub dest: PathBuf,
}

impl ProvisionPlan {
    /// Resolve a plan, checking the platform before anything else.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::UnsupportedPlatform`] if the host does not match the
    /// package's platform, or a descriptor/repository error if the version
    /// or release repository cannot be determined.
    pub fn resolve(
        descriptor: &PackageDescriptor,
        branding: &Branding,
        inputs: PlanInputs,
    ) -> Result<Self, ProvisionError> {
        validate_platform(&inputs.host, &branding.platform)?;

        let version = descriptor.release_version()?;
        let repo = OwnerRepo::resolve(
            inputs.repo_override.as_deref(),
            descriptor.repository.as_ref().map(|r| r.url()),
            branding.fallback_repo.as_deref(),
            &branding.repo_env,
        )?;
        let origin = inputs
            .origin_override
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| branding.release_origin.clone());

        Ok(Self {
            host: inputs.host,
            required: branding.platform.clone(),
            repo,
            version,
            origin,
            asset_name: branding.asset_name.clone(),
            dest: paths::binary_path(&inputs.package_root, &branding.binary_name),
        })
    }

    /// `<origin>/<owner>/<repo>/releases/download/v<version>/<asset>`
    pub fn download_url(&self) -> String {
        format!(
            "{}/{}/{}/releases/download/v{}/{}",
            self.origin.trim_end_matches('/'),
            self.repo.owner(),
            self.repo.name(),
            self.version,
            self.asset_name
        )
    }

    /// Directory the executable is installed into.
    pub fn dist_dir(&self) -> &Path {
        self.dest.parent().unwrap_or(Path::new("."))
    }
}

/// Fail unless `host` is exactly the `required` platform.
///
/// # Errors
///
/// Returns [`ProvisionError::UnsupportedPlatform`] on any mismatch.
pub fn validate_platform(host: &Platform, required: &Platform) -> Result<(), ProvisionError> {
    if host == required {
        Ok(())
    } else {
        Err(ProvisionError::UnsupportedPlatform {
            required: required.clone(),
            detected: host.clone(),
        })
    }
}
