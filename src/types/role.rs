// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::FIELD_MANAGER;
use k8s_openapi::api::rbac::v1::{ClusterRole, PolicyRule};
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRule {
    pub api_groups: Vec<String>,
    pub resources: Vec<String>,
    pub verbs: Vec<String>,
}

impl RoleRule {
    /// Read-only access to every resource in every API group.
    ///
    /// Not hardened: anyone holding the generated kubeconfig can read secrets.
    pub fn read_only_wildcard() -> Self {
        Self {
            api_groups: vec!["*".to_string()],
            resources: vec!["*".to_string()],
            verbs: ["get", "list", "watch"].map(String::from).to_vec(),
        }
    }
}

/// A ClusterRole to create for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: String,
    pub rules: Vec<RoleRule>,
}

impl RoleSpec {
    pub fn read_only(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: vec![RoleRule::read_only_wildcard()],
        }
    }

    pub fn to_cluster_role(&self) -> ClusterRole {
        ClusterRole {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                labels: Some(BTreeMap::from([(
                    "app.kubernetes.io/managed-by".to_string(),
                    FIELD_MANAGER.to_string(),
                )])),
                ..Default::default()
            },
            rules: Some(
                self.rules
                    .iter()
                    .map(|rule| PolicyRule {
                        api_groups: Some(rule.api_groups.clone()),
                        resources: Some(rule.resources.clone()),
                        verbs: rule.verbs.clone(),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }
}

/// Where the role bound to the user comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSource {
    /// Create (or replace) this role
    Create(RoleSpec),
    /// Bind to a role that must already exist
    Existing(String),
}

impl RoleSource {
    pub fn new(role_name: &str, existing_role: Option<&str>) -> Self {
        match existing_role {
            Some(name) => RoleSource::Existing(name.to_string()),
            None => RoleSource::Create(RoleSpec::read_only(role_name)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RoleSource::Create(spec) => &spec.name,
            RoleSource::Existing(name) => name,
        }
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, RoleSource::Existing(_))
    }
}
