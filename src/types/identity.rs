// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Names of the cluster objects provisioned for a user.
///
/// The names are deterministic so a rerun for the same user finds and
/// replaces what a previous run created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityNames {
    pub user: String,
    pub role: String,
    pub binding: String,
    pub csr: String,
}

impl IdentityNames {
    pub fn new(user: &str, existing_role: Option<&str>) -> Self {
        let role = match existing_role {
            Some(role) => role.to_string(),
            None => format!("{}-role", user),
        };
        let binding = format!("{}-{}", user, role);

        Self {
            user: user.to_string(),
            role,
            binding,
            csr: format!("{}-cr", user),
        }
    }

    /// Name of the context written to the output kubeconfig
    pub fn context(&self, cluster_name: &str) -> String {
        format!("{}-{}", cluster_name, self.user)
    }
}
