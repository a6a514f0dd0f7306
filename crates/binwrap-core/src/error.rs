//! Domain-specific errors for provisioning

use binwrap_schema::{DescriptorError, Platform};
use thiserror::Error;

use crate::io::download::DownloadError;
use crate::io::install::InstallError;
use crate::repo::RepoError;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("This package only supports {required} (detected {detected}).")]
    UnsupportedPlatform {
        required: Platform,
        detected: Platform,
    },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("Failed to download binary from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: DownloadError,
    },

    #[error("Failed to finalize binary install: {0}")]
    Install(#[from] InstallError),
}
