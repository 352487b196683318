// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line arguments

use crate::config::{default_kubeconfig_path, expand_home, Config};
use crate::constants::{approval, DEFAULT_CONTEXT_NAMESPACE, DEFAULT_USER};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const AFTER_HELP: &str = "\
Creates a ClusterRole and ClusterRoleBinding for the user, issues a client
certificate through the cluster's CertificateSigningRequest API and writes a
kubeconfig with read-only access.

WARNING: an existing binding or certificate for the same user is replaced.
Kubeconfigs generated earlier for that user stop working.";

#[derive(Parser, Debug)]
#[command(name = "lookout", version, about = "Create a read-only user kubeconfig", after_help = AFTER_HELP)]
pub struct Cli {
    /// Output kubeconfig file
    pub outfile: PathBuf,

    /// Admin kubeconfig with full access [default: $KUBECONFIG or ~/.kube/config]
    #[arg(short, long)]
    pub kubeconfig: Option<PathBuf>,

    /// Context of the admin kubeconfig to use [default: its current context]
    #[arg(long)]
    pub context: Option<String>,

    /// User to create or overwrite
    #[arg(short, long, default_value = DEFAULT_USER)]
    pub user: String,

    /// Existing ClusterRole to bind; omit to create one with get/list/watch on everything
    #[arg(short, long)]
    pub role: Option<String>,

    /// Organization in the certificate subject, used as the user's group
    #[arg(long)]
    pub group: Option<String>,

    /// Namespace of the generated context
    #[arg(long, default_value = DEFAULT_CONTEXT_NAMESPACE)]
    pub namespace: String,

    /// Requested certificate lifetime in seconds
    #[arg(long)]
    pub expiration_seconds: Option<i32>,

    /// Seconds between checks for the signed certificate
    #[arg(
        long,
        default_value_t = approval::POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..=approval::MAX_POLL_INTERVAL_SECS)
    )]
    pub poll_interval: u64,

    /// Seconds to wait for the signed certificate
    #[arg(
        long,
        default_value_t = approval::TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=approval::MAX_TIMEOUT_SECS)
    )]
    pub approval_timeout: u64,

    /// Overwrite existing role and binding without asking
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    pub fn to_config(&self) -> Config {
        let source = self
            .kubeconfig
            .clone()
            .map(expand_home)
            .unwrap_or_else(default_kubeconfig_path);

        let mut config = Config::new(source);
        config.source_context = self.context.clone();
        config.user = self.user.clone();
        config.existing_role = self.role.clone();
        config.group = self.group.clone();
        config.context_namespace = self.namespace.clone();
        config.expiration_seconds = self.expiration_seconds;
        config.poll_interval = Duration::from_secs(self.poll_interval);
        config.approval_timeout = Duration::from_secs(self.approval_timeout);
        config.assume_yes = self.yes;
        config
    }
}
