//! Run-time flow: hand the invocation over to the provisioned executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use binwrap_schema::MarkerVar;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Native binary not found at {}. The postinstall step may have failed.", path.display())]
    NotProvisioned { path: PathBuf },

    #[error("Failed to execute {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Whether the provisioner has put an executable at `path`.
pub fn is_provisioned(path: &Path) -> bool {
    path.is_file()
}

/// Run `binary` with `args`, inheriting stdio and the environment, and wait.
///
/// `marker`, when set, is added to the child's environment on top of
/// everything the launcher itself was given.
pub fn launch<I>(binary: &Path, args: I, marker: Option<&MarkerVar>) -> Result<ExitStatus, LaunchError>
where
    I: IntoIterator<Item = OsString>,
{
    if !is_provisioned(binary) {
        return Err(LaunchError::NotProvisioned {
            path: binary.to_path_buf(),
        });
    }

    let mut cmd = Command::new(binary);
    cmd.args(args);
    if let Some(marker) = marker {
        cmd.env(&marker.name, &marker.value);
    }

    tracing::debug!(binary = %binary.display(), "Launching provisioned binary");
    cmd.status().map_err(|source| LaunchError::Spawn {
        path: binary.to_path_buf(),
        source,
    })
}

/// Exit code the launcher should finish with for a child's `status`.
///
/// The child's own code is passed through verbatim. A child killed by a
/// signal maps to `128 + signal`, the shell convention, so it never reads
/// as success.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("tool");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_missing_binary_is_not_provisioned() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tool");
        assert!(!is_provisioned(&path));
        let err = launch(&path, os_args(&["--version"]), None).unwrap_err();
        assert!(matches!(err, LaunchError::NotProvisioned { .. }));
    }

    #[test]
    fn test_exit_code_passthrough() {
        let dir = TempDir::new().unwrap();
        let bin = script(dir.path(), "exit 42");
        let status = launch(&bin, os_args(&[]), None).unwrap();
        assert_eq!(exit_code(status), 42);
    }

    #[test]
    fn test_args_forwarded_verbatim() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("args.txt");
        let bin = script(
            dir.path(),
            &format!(
                "printf '%s\\n' \"$#\" \"$@\" > '{}'",
                out.display()
            ),
        );
        let status = launch(&bin, os_args(&["--version"]), None).unwrap();
        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "1\n--version\n");
    }

    #[test]
    fn test_marker_env_injected() {
        let dir = TempDir::new().unwrap();
        let bin = script(dir.path(), "test \"$BINWRAP_TEST_CHANNEL\" = npm");
        let marker = MarkerVar {
            name: "BINWRAP_TEST_CHANNEL".to_string(),
            value: "npm".to_string(),
        };
        assert!(launch(&bin, os_args(&[]), Some(&marker)).unwrap().success());
        assert!(!launch(&bin, os_args(&[]), None).unwrap().success());
    }

    #[test]
    fn test_signal_maps_to_128_plus() {
        let dir = TempDir::new().unwrap();
        let bin = script(dir.path(), "kill -9 $$");
        let status = launch(&bin, os_args(&[]), None).unwrap();
        assert_eq!(exit_code(status), 128 + 9);
    }

    #[test]
    fn test_non_executable_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tool");
        std::fs::write(&path, b"not executable").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let err = launch(&path, os_args(&[]), None).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
