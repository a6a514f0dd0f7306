use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Overrides where the package root (the directory holding `package.json`) is.
pub const PACKAGE_ROOT_ENV: &str = "BINWRAP_PACKAGE_ROOT";

/// Directory the provisioned executable lives in: <root>/dist
pub fn dist_dir(package_root: &Path) -> PathBuf {
    package_root.join("dist")
}

/// Installed executable: <root>/dist/<binary>
pub fn binary_path(package_root: &Path, binary_name: &str) -> PathBuf {
    dist_dir(package_root).join(binary_name)
}

/// Suffix of staged downloads: <final>.XXXXXX.tmp
pub const TEMP_SUFFIX: &str = ".tmp";

/// Prefix of staged downloads for `final_path`: `<final>.`
///
/// Each install gets its own random name after this prefix, in the same
/// directory as `final_path` so the closing rename never crosses volumes.
pub fn temp_prefix(final_path: &Path) -> OsString {
    let mut name = final_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name
}

/// Package root as seen from the launcher.
///
/// `BINWRAP_PACKAGE_ROOT` wins; otherwise the launcher is assumed to sit at
/// `<root>/bin/<launcher>`, with symlinks (npm's `.bin` shims) resolved.
pub fn launcher_package_root() -> std::io::Result<PathBuf> {
    if let Some(root) = std::env::var_os(PACKAGE_ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }
    let exe = std::env::current_exe()?.canonicalize()?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Launcher at {} has no package root", exe.display()),
            )
        })
}

/// Extract the filename from a URL.
pub fn filename_from_url(url: &str) -> &str {
    url.split('/').next_back().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let root = Path::new("/pkg");
        assert_eq!(dist_dir(root), PathBuf::from("/pkg/dist"));
        assert_eq!(
            binary_path(root, "entity-cli"),
            PathBuf::from("/pkg/dist/entity-cli")
        );
    }

    #[test]
    fn test_temp_prefix() {
        let final_path = Path::new("/pkg/dist/entity-cli");
        assert_eq!(temp_prefix(final_path), OsString::from("entity-cli."));
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://github.com/o/r/releases/download/v1.0.0/tool-darwin-arm64"),
            "tool-darwin-arm64"
        );
        assert_eq!(filename_from_url(""), "");
    }
}
