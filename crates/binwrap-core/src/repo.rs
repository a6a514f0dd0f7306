//! Owner/repository resolution for release downloads.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `github.com/owner/repo` or `github.com:owner/repo` anywhere in a string.
static GITHUB_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[:/]([^/]+)/([^/.]+)(?:\.git)?").expect("static regex is valid")
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepoError {
    #[error("Invalid repository format: expected 'owner/repo', got '{0}'")]
    InvalidFormat(String),

    #[error(
        "Could not determine release repository: set {env_var} or add a GitHub `repository` to package.json"
    )]
    Unresolved { env_var: String },
}

/// A validated GitHub repository reference in `owner/repo` format.
///
/// # Example
///
/// ```
/// use binwrap_core::repo::OwnerRepo;
///
/// let repo = OwnerRepo::new("acme/widget").unwrap();
/// assert_eq!(repo.owner(), "acme");
/// assert_eq!(repo.name(), "widget");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerRepo {
    owner: String,
    name: String,
}

impl OwnerRepo {
    /// Validate an `owner/repo` string.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::InvalidFormat`] unless `s` has exactly two
    /// non-empty segments.
    pub fn new(s: &str) -> Result<Self, RepoError> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RepoError::InvalidFormat(s.to_string())),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extract `owner/repo` from a package.json `repository` URL.
    ///
    /// Handles `git+https://github.com/o/r.git`, `https://github.com/o/r`,
    /// bare `github.com/o/r` and `git@github.com:o/r.git`. Only GitHub hosts
    /// are recognised since releases are fetched from GitHub.
    pub fn from_repository_url(raw: &str) -> Option<Self> {
        let cleaned = raw.trim();
        let cleaned = cleaned.strip_prefix("git+").unwrap_or(cleaned);

        if let Ok(parsed) = url::Url::parse(cleaned)
            && parsed.host_str().is_some_and(|h| h.contains("github.com"))
        {
            let mut segments = parsed
                .path_segments()
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty());
            if let (Some(owner), Some(name)) = (segments.next(), segments.next()) {
                let name = name.strip_suffix(".git").unwrap_or(name);
                if !name.is_empty() {
                    return Some(Self {
                        owner: owner.to_string(),
                        name: name.to_string(),
                    });
                }
            }
        }

        let caps = GITHUB_PATH.captures(cleaned)?;
        Some(Self {
            owner: caps[1].to_string(),
            name: caps[2].to_string(),
        })
    }

    /// Resolve the release repository, most specific source first:
    /// the environment override, then the manifest's `repository` URL,
    /// then the package's configured fallback.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::InvalidFormat`] if the override or fallback is
    /// malformed, and [`RepoError::Unresolved`] if no source yields a value.
    pub fn resolve(
        env_override: Option<&str>,
        repository_url: Option<&str>,
        fallback: Option<&str>,
        env_var: &str,
    ) -> Result<Self, RepoError> {
        if let Some(value) = env_override.filter(|v| !v.trim().is_empty()) {
            tracing::debug!(env_var, value, "Using repository override from environment");
            return Self::new(value);
        }

        if let Some(repo) = repository_url.and_then(Self::from_repository_url) {
            tracing::debug!(%repo, "Using repository from package.json");
            return Ok(repo);
        }

        match fallback {
            Some(value) => {
                tracing::debug!(value, "Using fallback repository");
                Self::new(value)
            }
            None => Err(RepoError::Unresolved {
                env_var: env_var.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OwnerRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for OwnerRepo {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
