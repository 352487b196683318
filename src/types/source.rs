// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-only view of the admin kubeconfig the user is provisioned from.

use crate::error::{LookoutError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use kube::config::Kubeconfig;
use std::path::Path;

/// Connection details of the single cluster in the source kubeconfig
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceClusterConfig {
    pub cluster_name: String,
    pub server: String,
    /// Base64 encoded CA bundle, as stored in `certificate-authority-data`
    pub ca_data: String,
}

impl SourceClusterConfig {
    /// Extract the cluster entry from a parsed kubeconfig.
    ///
    /// Exactly one cluster is supported. A CA file reference is resolved
    /// relative to `base_dir` and inlined.
    pub fn from_kubeconfig(kubeconfig: &Kubeconfig, base_dir: Option<&Path>) -> Result<Self> {
        let named = match kubeconfig.clusters.as_slice() {
            [only] => only,
            [] => {
                return Err(LookoutError::ConfigError(
                    "kubeconfig does not define any cluster".to_string(),
                ))
            }
            many => {
                return Err(LookoutError::ConfigError(format!(
                    "kubeconfig contains {} clusters, only one is supported",
                    many.len()
                )))
            }
        };

        let Some(cluster) = named.cluster.as_ref() else {
            return Err(LookoutError::ConfigError(format!(
                "cluster '{}' has no connection details",
                named.name
            )));
        };

        let Some(server) = cluster.server.clone() else {
            return Err(LookoutError::ConfigError(format!(
                "cluster '{}' has no server URL",
                named.name
            )));
        };

        let ca_data = match (&cluster.certificate_authority_data, &cluster.certificate_authority) {
            (Some(data), _) => {
                STANDARD.decode(data.trim()).map_err(|e| {
                    LookoutError::ConfigError(format!(
                        "certificate-authority-data of cluster '{}' is not valid base64: {}",
                        named.name, e
                    ))
                })?;
                data.trim().to_string()
            }
            (None, Some(ca_file)) => {
                let path = match base_dir {
                    Some(dir) => dir.join(ca_file),
                    None => Path::new(ca_file).to_path_buf(),
                };
                let pem = std::fs::read(&path).map_err(|e| {
                    LookoutError::ConfigError(format!(
                        "Failed to read certificate-authority {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                STANDARD.encode(pem)
            }
            (None, None) => {
                return Err(LookoutError::ConfigError(format!(
                    "cluster '{}' has no certificate authority",
                    named.name
                )))
            }
        };

        Ok(Self {
            cluster_name: named.name.clone(),
            server,
            ca_data,
        })
    }
}

/// Load a kubeconfig file from disk
pub fn read_kubeconfig(path: &Path) -> Result<Kubeconfig> {
    Kubeconfig::read_from(path).map_err(|e| {
        LookoutError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
    })
}
