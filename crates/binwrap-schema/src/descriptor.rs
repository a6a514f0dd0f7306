//! The npm `package.json` manifest, as far as binwrap reads it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::WrapperConfig;

/// File name of the package manifest inside the package root.
pub const MANIFEST_FILE: &str = "package.json";

/// Errors raised while loading or interpreting a [`PackageDescriptor`].
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The manifest could not be read from disk.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or is missing required fields.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The declared version is not a semantic version.
    #[error("Invalid package version '{version}': {source}")]
    InvalidVersion {
        /// The raw version string.
        version: String,
        /// Underlying semver error.
        source: semver::Error,
    },

    /// The executable name would resolve outside the `dist/` directory.
    #[error("Invalid binary name '{0}': must be a plain file name")]
    InvalidBinaryName(String),
}

/// The `repository` field of `package.json`.
///
/// npm accepts either a bare string or an object with a `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    /// `"repository": "github.com/acme/widget"`
    Url(String),
    /// `"repository": { "type": "git", "url": "git+https://..." }`
    Detailed {
        /// VCS type, usually `git`.
        #[serde(rename = "type", default)]
        kind: Option<String>,
        /// Repository URL.
        url: String,
    },
}

impl Repository {
    /// The URL, whichever form the manifest used.
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Detailed { url, .. } => url,
        }
    }
}

/// Static package metadata read from `package.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    /// Package name, possibly scoped (`@entityauth/cli`).
    pub name: String,

    /// Declared package version; release tags are `v<version>`.
    pub version: String,

    /// Where the package source lives, if declared.
    #[serde(default)]
    pub repository: Option<Repository>,

    /// Wrapper-specific configuration.
    #[serde(default)]
    pub binwrap: WrapperConfig,
}

impl PackageDescriptor {
    /// Load `package.json` from a package root directory.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Read`] if the file cannot be read and
    /// [`DescriptorError::Parse`] if it is not a valid manifest.
    pub fn load(package_root: &Path) -> Result<Self, DescriptorError> {
        let path = package_root.join(MANIFEST_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|source| DescriptorError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| DescriptorError::Parse { path, source })
    }

    /// Parse a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Parse`] if the JSON is not a valid manifest.
    pub fn from_json(raw: &str) -> Result<Self, DescriptorError> {
        serde_json::from_str(raw).map_err(|source| DescriptorError::Parse {
            path: PathBuf::from(MANIFEST_FILE),
            source,
        })
    }

    /// The declared version as a validated semantic version.
    ///
    /// A leading `v` is tolerated so that `v1.2.3` and `1.2.3` both
    /// produce the release tag `v1.2.3`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidVersion`] if the version is not semver.
    pub fn release_version(&self) -> Result<semver::Version, DescriptorError> {
        let trimmed = self.version.trim();
        let raw = trimmed.strip_prefix('v').unwrap_or(trimmed);
        semver::Version::parse(raw).map_err(|source| DescriptorError::InvalidVersion {
            version: self.version.clone(),
            source,
        })
    }

    /// Package name without its npm scope (`@entityauth/cli` -> `cli`).
    pub fn unscoped_name(&self) -> &str {
        match self.name.strip_prefix('@') {
            Some(scoped) => scoped.split_once('/').map_or(scoped, |(_, name)| name),
            None => &self.name,
        }
    }
}
