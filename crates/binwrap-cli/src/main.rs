//! binwrap-provision - postinstall hook

use std::process::ExitCode;

use clap::Parser;

use binwrap_cli::{Cli, cmd};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    binwrap_cli::init_tracing();

    let cli = Cli::parse();
    cmd::provision::provision(&cli).await
}
