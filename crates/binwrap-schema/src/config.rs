//! Per-package wrapper configuration (`"binwrap"` block of `package.json`).
//!
//! Each npm package that ships a native binary differs only in branding:
//! which tag prefixes its diagnostics, which repository hosts its releases,
//! and which environment variable overrides that repository. Everything
//! else is shared.

use serde::{Deserialize, Serialize};

use crate::descriptor::{DescriptorError, PackageDescriptor};
use crate::platform::Platform;

/// Release host used when the manifest does not name one.
pub const DEFAULT_RELEASE_ORIGIN: &str = "https://github.com";

/// An environment variable injected into the launched binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerVar {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: String,
}

/// The raw `binwrap` block. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WrapperConfig {
    /// Tag used to prefix diagnostics. Defaults to the package name.
    pub display_name: Option<String>,
    /// File name of the installed executable under `dist/`.
    pub binary_name: Option<String>,
    /// Release asset to download. Defaults to `<binaryName>-<os>-<arch>`.
    pub asset_name: Option<String>,
    /// `owner/repo` used when neither the environment nor `repository` resolve one.
    pub fallback_repo: Option<String>,
    /// Environment variable that overrides `owner/repo`.
    pub repo_env: Option<String>,
    /// The single supported platform.
    pub platform: Option<Platform>,
    /// Scheme and host serving release assets.
    pub release_origin: Option<String>,
    /// Variable injected into the child environment by the launcher.
    pub marker: Option<MarkerVar>,
}

/// Fully-defaulted branding for one wrapped package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    /// npm package name, used in remediation hints.
    pub package_name: String,
    /// Diagnostic prefix.
    pub display_name: String,
    /// Installed executable name.
    pub binary_name: String,
    /// Release asset name.
    pub asset_name: String,
    /// Last-resort `owner/repo`.
    pub fallback_repo: Option<String>,
    /// Override variable name.
    pub repo_env: String,
    /// Supported platform.
    pub platform: Platform,
    /// Release origin.
    pub release_origin: String,
    /// Launcher marker variable.
    pub marker: Option<MarkerVar>,
}

impl Branding {
    /// Apply defaults to a descriptor's `binwrap` block.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidBinaryName`] if the executable name
    /// is empty, `.`/`..`, or contains a path separator.
    pub fn from_descriptor(descriptor: &PackageDescriptor) -> Result<Self, DescriptorError> {
        let cfg = &descriptor.binwrap;
        let binary_name = cfg
            .binary_name
            .clone()
            .unwrap_or_else(|| descriptor.unscoped_name().to_string());
        if !is_plain_file_name(&binary_name) {
            return Err(DescriptorError::InvalidBinaryName(binary_name));
        }
        let platform = cfg.platform.clone().unwrap_or_default();
        let asset_name = cfg
            .asset_name
            .clone()
            .unwrap_or_else(|| format!("{binary_name}-{}", platform.asset_tag()));
        let repo_env = cfg
            .repo_env
            .clone()
            .unwrap_or_else(|| default_repo_env(&binary_name));

        Ok(Self {
            package_name: descriptor.name.clone(),
            display_name: cfg
                .display_name
                .clone()
                .unwrap_or_else(|| descriptor.name.clone()),
            binary_name,
            asset_name,
            fallback_repo: cfg.fallback_repo.clone(),
            repo_env,
            platform,
            release_origin: cfg
                .release_origin
                .clone()
                .unwrap_or_else(|| DEFAULT_RELEASE_ORIGIN.to_string()),
            marker: cfg.marker.clone(),
        })
    }

    /// Bracketed diagnostic prefix, e.g. `[entity-cli]`.
    pub fn tag(&self) -> String {
        format!("[{}]", self.display_name)
    }

    /// Command a user can run to retry the install step by hand.
    pub fn remediation(&self) -> String {
        format!("npm rebuild {} --foreground-scripts", self.package_name)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// `entity-cli` -> `ENTITY_CLI_REPO`
fn default_repo_env(binary_name: &str) -> String {
    let stem: String = binary_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_REPO")
}
