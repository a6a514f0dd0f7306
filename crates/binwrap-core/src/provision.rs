//! Install-time flow: download the release asset and put it in place.

use std::path::PathBuf;

use reqwest::Client;

use crate::error::ProvisionError;
use crate::io::{download, install};
use crate::plan::{ProvisionPlan, validate_platform};

/// Outcome of a successful [`provision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    pub path: PathBuf,
    pub url: String,
    pub bytes: u64,
}

/// Download and install the executable described by `plan`.
///
/// All-or-nothing: on failure no new file appears at `plan.dest` and the
/// staged `.tmp` file is removed. A binary left by an earlier successful
/// install is not touched. Each call stages under its own name, so
/// concurrent installs to the same `dest` leave one complete binary.
pub async fn provision(client: &Client, plan: &ProvisionPlan) -> Result<Provisioned, ProvisionError> {
    validate_platform(&plan.host, &plan.required)?;

    install::ensure_dir(plan.dist_dir()).await?;

    let url = plan.download_url();
    let tmp = install::stage(&plan.dest)?;
    tracing::debug!(%url, tmp = %tmp.display(), "Downloading release asset");

    let bytes = match download::download_following_redirects(client, &url, &tmp).await {
        Ok(bytes) => bytes,
        Err(source) => {
            tmp.close().ok();
            return Err(ProvisionError::Network { url, source });
        }
    };

    install::finalize_install(tmp, &plan.dest).await?;

    tracing::info!(path = %plan.dest.display(), bytes, "Provisioned native binary");
    Ok(Provisioned {
        path: plan.dest.clone(),
        url,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::OwnerRepo;
    use binwrap_schema::{Arch, Os, Platform};
    use mockito::Server;
    use tempfile::TempDir;

    const ASSET_PATH: &str = "/acme/widget/releases/download/v1.2.3/widget-darwin-arm64";

    fn leftover_temps(plan: &ProvisionPlan) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(plan.dist_dir()) else {
            return Vec::new();
        };
        entries
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().ends_with(crate::paths::TEMP_SUFFIX))
            .collect()
    }

    fn plan(origin: &str, root: &std::path::Path) -> ProvisionPlan {
        ProvisionPlan {
            host: Platform::darwin_arm64(),
            required: Platform::darwin_arm64(),
            repo: OwnerRepo::new("acme/widget").unwrap(),
            version: semver::Version::new(1, 2, 3),
            origin: origin.to_string(),
            asset_name: "widget-darwin-arm64".to_string(),
            dest: root.join("nested").join("dist").join("widget"),
        }
    }

    #[tokio::test]
    async fn test_provision_round_trip() {
        let mut server = Server::new_async().await;
        let body = b"#!/bin/sh\necho widget\n".to_vec();
        let m = server
            .mock("GET", ASSET_PATH)
            .with_status(200)
            .with_body(&body)
            .create_async()
            .await;

        let root = TempDir::new().unwrap();
        let plan = plan(&server.url(), root.path());
        let client = download::client().unwrap();

        let done = provision(&client, &plan).await.unwrap();

        m.assert_async().await;
        assert_eq!(done.path, plan.dest);
        assert_eq!(done.bytes, body.len() as u64);
        assert_eq!(std::fs::read(&plan.dest).unwrap(), body);
        assert!(leftover_temps(&plan).is_empty());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&plan.dest).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[tokio::test]
    async fn test_failed_download_leaves_nothing() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", ASSET_PATH)
            .with_status(500)
            .create_async()
            .await;

        let root = TempDir::new().unwrap();
        let plan = plan(&server.url(), root.path());
        let client = download::client().unwrap();

        let err = provision(&client, &plan).await.unwrap_err();

        assert!(matches!(err, ProvisionError::Network { .. }));
        assert!(err.to_string().contains("Unexpected status: 500"));
        assert!(!plan.dest.exists());
        assert!(leftover_temps(&plan).is_empty());
    }

    #[tokio::test]
    async fn test_failed_download_keeps_previous_install() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", ASSET_PATH)
            .with_status(404)
            .create_async()
            .await;

        let root = TempDir::new().unwrap();
        let plan = plan(&server.url(), root.path());
        std::fs::create_dir_all(plan.dist_dir()).unwrap();
        std::fs::write(&plan.dest, b"previous").unwrap();

        let client = download::client().unwrap();
        assert!(provision(&client, &plan).await.is_err());
        assert_eq!(std::fs::read(&plan.dest).unwrap(), b"previous");
    }

    #[tokio::test]
    async fn test_unsupported_platform_makes_no_request() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let root = TempDir::new().unwrap();
        let mut plan = plan(&server.url(), root.path());
        plan.host = Platform::new(Os::Linux, Arch::X64);
        let client = download::client().unwrap();

        let err = provision(&client, &plan).await.unwrap_err();

        assert!(matches!(err, ProvisionError::UnsupportedPlatform { .. }));
        m.assert_async().await;
        assert!(!plan.dist_dir().exists());
    }

    #[tokio::test]
    async fn test_failed_install_removes_stage() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", ASSET_PATH)
            .with_status(200)
            .with_body("new")
            .create_async()
            .await;

        let root = TempDir::new().unwrap();
        let plan = plan(&server.url(), root.path());
        // A non-empty directory at the destination makes the rename fail.
        std::fs::create_dir_all(plan.dest.join("occupied")).unwrap();

        let client = download::client().unwrap();
        let err = provision(&client, &plan).await.unwrap_err();

        assert!(matches!(err, ProvisionError::Install(_)));
        assert!(plan.dest.is_dir());
        assert!(leftover_temps(&plan).is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_installs_never_mix() {
        use std::io::Write;
        use std::time::Duration;

        const HALF: usize = 4096;
        let body_a = vec![b'A'; HALF * 2];
        let body_b = vec![b'B'; 1000];

        // A stalls mid-stream so B starts and finishes while A is in flight.
        let mut server_a = Server::new_async().await;
        let _ma = server_a
            .mock("GET", ASSET_PATH)
            .with_status(200)
            .with_chunked_body(|w| {
                w.write_all(&[b'A'; HALF])?;
                w.flush()?;
                std::thread::sleep(Duration::from_millis(800));
                w.write_all(&[b'A'; HALF])
            })
            .create_async()
            .await;
        let mut server_b = Server::new_async().await;
        let _mb = server_b
            .mock("GET", ASSET_PATH)
            .with_status(200)
            .with_body(&body_b)
            .create_async()
            .await;

        let root = TempDir::new().unwrap();
        let plan_a = plan(&server_a.url(), root.path());
        let plan_b = plan(&server_b.url(), root.path());
        assert_eq!(plan_a.dest, plan_b.dest);

        let client = download::client().unwrap();
        let task_a = {
            let client = client.clone();
            let plan_a = plan_a.clone();
            tokio::spawn(async move { provision(&client, &plan_a).await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;

        let done_b = provision(&client, &plan_b).await.unwrap();
        assert_eq!(done_b.bytes, body_b.len() as u64);
        assert_eq!(std::fs::read(&plan_b.dest).unwrap(), body_b);

        let done_a = task_a.await.unwrap().unwrap();
        assert_eq!(done_a.bytes, body_a.len() as u64);

        let installed = std::fs::read(&plan_a.dest).unwrap();
        assert!(
            installed == body_a || installed == body_b,
            "installed binary mixes both downloads ({} bytes)",
            installed.len()
        );
        assert!(leftover_temps(&plan_a).is_empty());
    }
}
