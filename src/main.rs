// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lookout::cli::Cli;
use lookout::config::Config;
use lookout::error::LookoutError;
use lookout::prompt::{AssumeYes, Confirm, TerminalPrompt};
use lookout::provisioner::Provisioner;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.to_config();
    info!(
        "Provisioning read-only user '{}' from {}",
        config.user,
        config.source_kubeconfig.display()
    );

    let result = if config.assume_yes {
        provision(config, &cli.outfile, AssumeYes).await
    } else {
        provision(config, &cli.outfile, TerminalPrompt).await
    };

    match result {
        Err(LookoutError::UserAbort(question)) => {
            info!("Terminated by user at: {}", question);
            Ok(())
        }
        other => other.map_err(Into::into),
    }
}

async fn provision<C: Confirm>(config: Config, outfile: &Path, prompt: C) -> lookout::error::Result<()> {
    let mut provisioner = Provisioner::from_source_file(config, prompt).await?;
    provisioner.run(outfile).await?;
    Ok(())
}
