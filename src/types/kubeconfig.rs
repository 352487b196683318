// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The standalone kubeconfig handed to the provisioned user.

use crate::error::Result;
use crate::types::SourceClusterConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct OutputKubeconfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub clusters: Vec<NamedCluster>,
    pub users: Vec<NamedUser>,
    pub contexts: Vec<NamedContext>,
    pub current_context: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: ClusterEntry,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    pub server: String,
    pub certificate_authority_data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NamedUser {
    pub name: String,
    pub user: UserEntry,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct UserEntry {
    pub client_certificate_data: String,
    pub client_key_data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NamedContext {
    pub name: String,
    pub context: ContextEntry,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContextEntry {
    pub cluster: String,
    pub user: String,
    pub namespace: String,
}

impl OutputKubeconfig {
    /// Assemble a kubeconfig with one cluster, one user with embedded
    /// credentials and one current context tying them together.
    pub fn assemble(
        source: &SourceClusterConfig,
        user: &str,
        context_name: &str,
        namespace: &str,
        certificate_pem: &[u8],
        key_pem: &str,
    ) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "Config".to_string(),
            clusters: vec![NamedCluster {
                name: source.cluster_name.clone(),
                cluster: ClusterEntry {
                    server: source.server.clone(),
                    certificate_authority_data: source.ca_data.clone(),
                },
            }],
            users: vec![NamedUser {
                name: user.to_string(),
                user: UserEntry {
                    client_certificate_data: STANDARD.encode(certificate_pem),
                    client_key_data: STANDARD.encode(key_pem.as_bytes()),
                },
            }],
            contexts: vec![NamedContext {
                name: context_name.to_string(),
                context: ContextEntry {
                    cluster: source.cluster_name.clone(),
                    user: user.to_string(),
                    namespace: namespace.to_string(),
                },
            }],
            current_context: context_name.to_string(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the kubeconfig, replacing any existing file. The file holds a
    /// private key so it is only readable by the owner.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(path).await?;
        file.write_all(yaml.as_bytes()).await?;
        file.flush().await?;

        #[cfg(unix)]
        {
            // mode() only applies when the file is created
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        info!("Wrote kubeconfig {}", path.display());
        Ok(())
    }
}
