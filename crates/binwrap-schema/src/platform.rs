//! Target platform of a release asset.

use serde::{Deserialize, Serialize};

use crate::arch::{Arch, Os};

/// An (operating system, architecture) pair.
///
/// Written as `darwin-arm64` in asset names and configuration, and shown as
/// `darwin/arm64` in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// Create a platform from its parts.
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// The platform of the running process.
    pub fn current() -> Self {
        Self::new(Os::current(), Arch::current())
    }

    /// macOS on Apple Silicon, the only target the wrapped CLIs ship today.
    pub fn darwin_arm64() -> Self {
        Self::new(Os::Darwin, Arch::Arm64)
    }

    /// Tag used in release asset names (`darwin-arm64`).
    pub fn asset_tag(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::darwin_arm64()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (os, arch) = s
            .split_once('/')
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("Invalid platform '{s}': expected 'os-arch'"))?;
        Ok(Self::new(os.parse()?, arch.parse()?))
    }
}

impl TryFrom<String> for Platform {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.asset_tag()
    }
}
