//! Provision command: the package's postinstall hook.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use binwrap_core::io::download;
use binwrap_core::provision::provision as provision_plan;
use binwrap_core::{PlanInputs, ProvisionPlan};
use binwrap_schema::{Branding, PackageDescriptor, Platform};

use crate::Cli;
use crate::ui::{Output, render_error};

/// Download and install the package's native binary.
///
/// Prints one tagged line either way: the install location on stdout, or
/// the reason for failure on stderr.
pub async fn provision(cli: &Cli) -> ExitCode {
    let package_root = absolute(&cli.package_root);

    let loaded = PackageDescriptor::load(&package_root)
        .and_then(|descriptor| Branding::from_descriptor(&descriptor).map(|b| (descriptor, b)));
    let (descriptor, branding) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            Output::anonymous().error(&render_error(&e.into()));
            return ExitCode::FAILURE;
        }
    };
    let output = Output::new(&branding);

    let inputs = PlanInputs {
        package_root,
        host: Platform::current(),
        repo_override: std::env::var(&branding.repo_env).ok(),
        origin_override: cli.origin.clone(),
    };

    match run(&descriptor, &branding, inputs, cli.dry_run, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&render_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(
    descriptor: &PackageDescriptor,
    branding: &Branding,
    inputs: PlanInputs,
    dry_run: bool,
    output: &Output,
) -> Result<()> {
    let plan = ProvisionPlan::resolve(descriptor, branding, inputs)?;
    tracing::debug!(?plan, "Resolved provisioning plan");

    if dry_run {
        output.info(&format!(
            "Would download {} to {}",
            plan.download_url(),
            plan.dest.display()
        ));
        return Ok(());
    }

    let client = download::client().context("Failed to create HTTP client")?;
    let installed = provision_plan(&client, &plan).await?;

    output.info(&format!(
        "Installed native binary to {}",
        installed.path.display()
    ));
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
