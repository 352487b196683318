// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sequences role, binding and certificate provisioning for one user.

use crate::config::Config;
use crate::error::{LookoutError, Result};
use crate::kubernetes::csr::{CsrClient, CsrStatus, PollSettings};
use crate::kubernetes::create_client;
use crate::kubernetes::rbac::RbacClient;
use crate::pki::{CertificateRequest, FailureReason};
use crate::prompt::Confirm;
use crate::types::source::read_kubeconfig;
use crate::types::{IdentityNames, OutputKubeconfig, RoleSource, SourceClusterConfig};
use kube::config::Kubeconfig;
use kube::Client;
use std::path::Path;
use tracing::{info, instrument};

/// Deletions the operator agreed to before anything is changed
#[derive(Debug, Default, PartialEq, Eq)]
struct RbacPlan {
    replace_binding: bool,
    replace_role: bool,
}

pub struct Provisioner<C> {
    rbac: RbacClient,
    csrs: CsrClient,
    config: Config,
    source: SourceClusterConfig,
    names: IdentityNames,
    role: RoleSource,
    prompt: C,
}

/// Read the admin kubeconfig named in `config` and extract the cluster the
/// user will be provisioned on.
pub fn load_source(config: &Config) -> Result<(Kubeconfig, SourceClusterConfig)> {
    let kubeconfig = read_kubeconfig(&config.source_kubeconfig)?;
    let source = SourceClusterConfig::from_kubeconfig(&kubeconfig, config.source_kubeconfig.parent())?;
    info!("Source cluster '{}' at {}", source.cluster_name, source.server);
    Ok((kubeconfig, source))
}

impl<C: Confirm> Provisioner<C> {
    /// Validate the admin kubeconfig and connect with it. No client exists
    /// until the source has been accepted.
    pub async fn from_source_file(config: Config, prompt: C) -> Result<Self> {
        let (kubeconfig, source) = load_source(&config)?;
        let client = create_client(kubeconfig, config.source_context.as_deref()).await?;
        info!("Connected to Kubernetes cluster");
        Ok(Self::new(client, config, source, prompt))
    }

    pub fn new(client: Client, config: Config, source: SourceClusterConfig, prompt: C) -> Self {
        let names = IdentityNames::new(&config.user, config.existing_role.as_deref());
        let role = RoleSource::new(&names.role, config.existing_role.as_deref());

        Self {
            rbac: RbacClient::new(client.clone()),
            csrs: CsrClient::new(client),
            config,
            source,
            names,
            role,
            prompt,
        }
    }

    pub fn names(&self) -> &IdentityNames {
        &self.names
    }

    /// Provision the user and write its kubeconfig to `output`.
    ///
    /// Stops with [`LookoutError::UserAbort`] if an overwrite is declined,
    /// in which case nothing in the cluster has been changed.
    #[instrument(skip(self, output), fields(user = %self.names.user, output = %output.display()))]
    pub async fn run(&mut self, output: &Path) -> Result<OutputKubeconfig> {
        let plan = self.plan_rbac().await?;
        self.apply_rbac(&plan).await?;

        let (request, certificate) = self.issue_certificate().await?;

        let kubeconfig = OutputKubeconfig::assemble(
            &self.source,
            &self.names.user,
            &self.names.context(&self.source.cluster_name),
            &self.config.context_namespace,
            &certificate,
            request.key_pem(),
        );
        kubeconfig.write_to(output).await?;

        info!(
            "User '{}' can now read cluster '{}' with {}",
            self.names.user,
            self.source.cluster_name,
            output.display()
        );
        Ok(kubeconfig)
    }

    /// Check what already exists and collect every confirmation up front
    async fn plan_rbac(&mut self) -> Result<RbacPlan> {
        let role_exists = self.rbac.role_exists(&self.names.role).await?;
        if self.role.is_existing() && !role_exists {
            return Err(LookoutError::RoleNotFound(self.names.role.clone()));
        }

        let mut plan = RbacPlan::default();

        if self.rbac.binding_exists(&self.names.binding).await? {
            self.confirm_overwrite(&format!(
                "ClusterRoleBinding '{}' already exists, overwrite?",
                self.names.binding
            ))?;
            plan.replace_binding = true;
        }

        if role_exists && !self.role.is_existing() {
            self.confirm_overwrite(&format!(
                "ClusterRole '{}' already exists, overwrite?",
                self.names.role
            ))?;
            plan.replace_role = true;
        }

        Ok(plan)
    }

    fn confirm_overwrite(&mut self, question: &str) -> Result<()> {
        if self.prompt.confirm(question)? {
            Ok(())
        } else {
            Err(LookoutError::UserAbort(question.to_string()))
        }
    }

    async fn apply_rbac(&self, plan: &RbacPlan) -> Result<()> {
        if plan.replace_binding {
            self.rbac.delete_binding(&self.names.binding).await?;
        }
        if plan.replace_role {
            self.rbac.delete_role(&self.names.role).await?;
        }

        if let RoleSource::Create(spec) = &self.role {
            self.rbac.apply_role(spec, &self.config.field_manager).await?;
        }
        self.rbac
            .create_binding(&self.names.binding, self.role.name(), &self.names.user)
            .await?;
        Ok(())
    }

    /// Returns the request, which holds the private key, with its signed certificate
    async fn issue_certificate(&self) -> Result<(CertificateRequest, Vec<u8>)> {
        self.csrs.delete_if_exists(&self.names.csr).await?;

        let mut request = CertificateRequest::generate(
            &self.names.csr,
            &self.names.user,
            self.config.group.as_deref(),
        )?;
        self.csrs
            .submit(&mut request, self.config.expiration_seconds)
            .await?;
        self.csrs.verify_visible(request.name()).await?;

        let certificate = match self.csrs.approve(&mut request).await? {
            CsrStatus::Signed(certificate) => Ok(certificate),
            CsrStatus::Rejected(reason) => Err(LookoutError::CertificateRejected {
                name: request.name().to_string(),
                reason,
            }),
            CsrStatus::Pending => {
                let settings = PollSettings {
                    interval: self.config.poll_interval,
                    timeout: self.config.approval_timeout,
                };
                self.csrs
                    .wait_for_certificate(request.name(), settings)
                    .await
            }
        };

        match certificate {
            Ok(certificate) => {
                request.mark_signed();
                Ok((request, certificate))
            }
            Err(e) => {
                match &e {
                    LookoutError::CertificateTimeout { .. } => {
                        request.mark_failed(FailureReason::Timeout)
                    }
                    LookoutError::CertificateRejected { .. } => {
                        request.mark_failed(FailureReason::Rejected)
                    }
                    _ => {}
                }
                info!("Certificate request {:?} did not complete", request);
                Err(e)
            }
        }
    }
}
