//! Atomic placement of a downloaded executable.
//!
//! Downloads are staged under a per-install random name next to the final
//! path, so concurrent installs never share a partial file and the last
//! rename wins with a complete binary.

use std::path::{Path, PathBuf};

use tempfile::TempPath;
use thiserror::Error;

use crate::paths::{TEMP_SUFFIX, temp_prefix};

/// Mode applied to installed executables (rwxr-xr-x).
pub const EXECUTABLE_MODE: u32 = 0o755;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to stage download in {}: {source}", dir.display())]
    Stage {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to mark {} executable: {source}", path.display())]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Create `dir` and any missing parents.
pub async fn ensure_dir(dir: &Path) -> Result<(), InstallError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| InstallError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// Reserve a fresh, empty staging file beside `dest`: `<dest>.XXXXXX.tmp`.
///
/// The returned path deletes its file when dropped unless it has been
/// handed to [`finalize_install`].
pub fn stage(dest: &Path) -> Result<TempPath, InstallError> {
    let dir = dest.parent().unwrap_or(Path::new("."));
    tempfile::Builder::new()
        .prefix(&temp_prefix(dest))
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map(tempfile::NamedTempFile::into_temp_path)
        .map_err(|source| InstallError::Stage {
            dir: dir.to_path_buf(),
            source,
        })
}

/// Make `tmp` executable, then rename it over `dest`.
///
/// The rename replaces any previous install in one step, so `dest` is only
/// ever absent, the old binary, or the complete new one. On failure the
/// staged file is removed.
pub async fn finalize_install(tmp: TempPath, dest: &Path) -> Result<(), InstallError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(EXECUTABLE_MODE);
        tokio::fs::set_permissions(&tmp, perms)
            .await
            .map_err(|source| InstallError::Permissions {
                path: tmp.to_path_buf(),
                source,
            })?;
    }

    let from = tmp.to_path_buf();
    tmp.persist(dest).map_err(|e| InstallError::Rename {
        from,
        to: dest.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!(dest = %dest.display(), "Installed executable");
    Ok(())
}
