// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{approval, DEFAULT_CONTEXT_NAMESPACE, DEFAULT_USER, FIELD_MANAGER};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Provisioner configuration, assembled from command line flags and the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Admin kubeconfig used to reach the cluster
    pub source_kubeconfig: PathBuf,
    /// Context of the source kubeconfig to authenticate with
    pub source_context: Option<String>,
    /// User the client certificate is issued to
    pub user: String,
    /// Existing ClusterRole to bind instead of creating one
    pub existing_role: Option<String>,
    /// Organization put in the certificate subject, seen by the API server as a group
    pub group: Option<String>,
    /// Namespace of the context written to the output kubeconfig
    pub context_namespace: String,
    /// Requested certificate lifetime; the signer default applies when unset
    pub expiration_seconds: Option<i32>,
    pub poll_interval: Duration,
    pub approval_timeout: Duration,
    pub field_manager: String,
    /// Answer yes to every overwrite prompt
    pub assume_yes: bool,
}

impl Config {
    pub fn new(source_kubeconfig: PathBuf) -> Self {
        Config {
            source_kubeconfig,
            source_context: None,
            user: DEFAULT_USER.to_string(),
            existing_role: None,
            group: None,
            context_namespace: DEFAULT_CONTEXT_NAMESPACE.to_string(),
            expiration_seconds: None,
            poll_interval: Duration::from_secs(approval::POLL_INTERVAL_SECS),
            approval_timeout: Duration::from_secs(approval::TIMEOUT_SECS),
            field_manager: FIELD_MANAGER.to_string(),
            assume_yes: false,
        }
    }
}

/// Resolve the default source kubeconfig: the first entry of `KUBECONFIG`,
/// falling back to `~/.kube/config`.
pub fn default_kubeconfig_path() -> PathBuf {
    kubeconfig_path_from(env::var_os("KUBECONFIG"), dirs::home_dir())
}

fn kubeconfig_path_from(
    kubeconfig_env: Option<std::ffi::OsString>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(first) = kubeconfig_env
        .as_deref()
        .and_then(|value| env::split_paths(value).find(|p| !p.as_os_str().is_empty()))
    {
        return first;
    }
    home.unwrap_or_default().join(".kube").join("config")
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: PathBuf) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map(|h| h.join(rest)).unwrap_or(path),
        Err(_) => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new(PathBuf::from("/tmp/admin.yaml"));

        assert_eq!(config.user, "qa-monitor");
        assert_eq!(config.context_namespace, "default");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.approval_timeout, Duration::from_secs(300));
        assert!(config.existing_role.is_none());
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_kubeconfig_path_from_env() {
        let path = kubeconfig_path_from(
            Some(OsString::from("/etc/kube/admin.conf")),
            Some(PathBuf::from("/home/ops")),
        );
        assert_eq!(path, PathBuf::from("/etc/kube/admin.conf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_kubeconfig_path_from_env_takes_first_entry() {
        let path = kubeconfig_path_from(
            Some(OsString::from("/a/config:/b/config")),
            Some(PathBuf::from("/home/ops")),
        );
        assert_eq!(path, PathBuf::from("/a/config"));
    }

    #[test]
    fn test_kubeconfig_path_fallback_to_home() {
        let path = kubeconfig_path_from(None, Some(PathBuf::from("/home/ops")));
        assert_eq!(path, PathBuf::from("/home/ops/.kube/config"));
    }

    #[test]
    fn test_kubeconfig_path_empty_env_falls_back() {
        let path = kubeconfig_path_from(Some(OsString::new()), Some(PathBuf::from("/home/ops")));
        assert_eq!(path, PathBuf::from("/home/ops/.kube/config"));
    }

    #[test]
    fn test_expand_home_leaves_absolute_path() {
        let path = expand_home(PathBuf::from("/srv/kubeconfig"));
        assert_eq!(path, PathBuf::from("/srv/kubeconfig"));
    }
}
