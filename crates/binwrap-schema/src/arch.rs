//! Operating system and CPU architecture names.

/// CPU architecture of a prebuilt binary.
///
/// Names follow Node's `process.arch` convention (`arm64`, `x64`) because
/// release assets for npm-distributed binaries are tagged that way.
///
/// # Example
///
/// ```
/// use binwrap_schema::Arch;
///
/// let arch: Arch = "aarch64".parse().unwrap();
/// assert_eq!(arch, Arch::Arm64);
/// assert_eq!(arch.as_str(), "arm64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    /// ARM64 (Apple Silicon, Graviton, ...)
    Arm64,
    /// `x86_64`
    X64,
    /// Any architecture binwrap has no special name for.
    Other(String),
}

impl Arch {
    /// Architecture of the running process.
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::ARCH)
    }

    /// Map a `std::env::consts::ARCH` value onto an [`Arch`].
    pub fn from_rust_name(name: &str) -> Self {
        match name {
            "aarch64" => Self::Arm64,
            "x86_64" => Self::X64,
            other => Self::Other(other.to_string()),
        }
    }

    /// Asset-tag representation (`arm64` / `x64`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Arm64 => "arm64",
            Self::X64 => "x64",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" => Err("Empty architecture".to_string()),
            "arm64" | "aarch64" => Ok(Self::Arm64),
            "x64" | "x86_64" | "amd64" => Ok(Self::X64),
            other => Ok(Self::Other(other.to_string())),
        }
    }
}

/// Operating system of a prebuilt binary, named like Node's `process.platform`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
    /// macOS
    Darwin,
    /// Linux
    Linux,
    /// Windows (`win32`)
    Windows,
    /// Anything else, kept verbatim.
    Other(String),
}

impl Os {
    /// Operating system of the running process.
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value onto an [`Os`].
    pub fn from_rust_name(name: &str) -> Self {
        match name {
            "macos" => Self::Darwin,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Asset-tag representation (`darwin` / `linux` / `win32`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "win32",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" => Err("Empty operating system".to_string()),
            "darwin" | "macos" => Ok(Self::Darwin),
            "linux" => Ok(Self::Linux),
            "win32" | "windows" => Ok(Self::Windows),
            other => Ok(Self::Other(other.to_string())),
        }
    }
}
