// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ClusterRole and ClusterRoleBinding management

use crate::error::Result;
use crate::types::RoleSpec;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, RoleRef, Subject};
use kube::{
    api::{DeleteParams, ObjectMeta, Patch, PatchParams, PostParams},
    Api, Client,
};
use tracing::{info, instrument};

const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";

/// Thin wrapper over the cluster-scoped RBAC APIs
pub struct RbacClient {
    roles: Api<ClusterRole>,
    bindings: Api<ClusterRoleBinding>,
}

impl RbacClient {
    pub fn new(client: Client) -> Self {
        Self {
            roles: Api::all(client.clone()),
            bindings: Api::all(client),
        }
    }

    pub async fn role_exists(&self, name: &str) -> Result<bool> {
        super::resource_exists(&self.roles, name).await
    }

    pub async fn binding_exists(&self, name: &str) -> Result<bool> {
        super::resource_exists(&self.bindings, name).await
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, name: &str) -> Result<()> {
        info!("Deleting ClusterRole '{}'", name);
        self.roles.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_binding(&self, name: &str) -> Result<()> {
        info!("Deleting ClusterRoleBinding '{}'", name);
        self.bindings.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    /// Apply the role with server-side apply
    #[instrument(skip(self, spec), fields(role = %spec.name))]
    pub async fn apply_role(&self, spec: &RoleSpec, field_manager: &str) -> Result<ClusterRole> {
        info!("Applying ClusterRole '{}'", spec.name);
        let pp = PatchParams::apply(field_manager).force();
        let role = self
            .roles
            .patch(&spec.name, &pp, &Patch::Apply(&spec.to_cluster_role()))
            .await?;
        Ok(role)
    }

    /// Bind `role` to the user `user`
    #[instrument(skip(self))]
    pub async fn create_binding(
        &self,
        name: &str,
        role: &str,
        user: &str,
    ) -> Result<ClusterRoleBinding> {
        info!(
            "Creating ClusterRoleBinding '{}' for user '{}' to role '{}'",
            name, user, role
        );
        let binding = self
            .bindings
            .create(&PostParams::default(), &user_binding(name, role, user))
            .await?;
        Ok(binding)
    }
}

fn user_binding(name: &str, role: &str, user: &str) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: RBAC_API_GROUP.to_string(),
            kind: "ClusterRole".to_string(),
            name: role.to_string(),
        },
        subjects: Some(vec![Subject {
            api_group: Some(RBAC_API_GROUP.to_string()),
            kind: "User".to_string(),
            name: user.to_string(),
            namespace: None,
        }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{deleted_json, MockService};

    const ROLES: &str = "/apis/rbac.authorization.k8s.io/v1/clusterroles";
    const BINDINGS: &str = "/apis/rbac.authorization.k8s.io/v1/clusterrolebindings";

    #[test]
    fn test_user_binding() {
        let binding = user_binding("u-u-role", "u-role", "u");

        assert_eq!(binding.metadata.name.as_deref(), Some("u-u-role"));
        assert_eq!(binding.role_ref.kind, "ClusterRole");
        assert_eq!(binding.role_ref.name, "u-role");
        let subjects = binding.subjects.unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].kind, "User");
        assert_eq!(subjects[0].name, "u");
    }

    #[tokio::test]
    async fn test_apply_role_uses_server_side_apply() {
        let spec = RoleSpec::read_only("u-role");
        let mock = MockService::new().on_patch(
            &format!("{}/u-role", ROLES),
            200,
            &serde_json::to_string(&spec.to_cluster_role()).unwrap(),
        );
        let rbac = RbacClient::new(mock.client());

        let role = rbac.apply_role(&spec, "lookout").await.unwrap();

        assert_eq!(role.metadata.name.as_deref(), Some("u-role"));
        let requests = mock.mutations();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(requests[0].json()["rules"][0]["verbs"][1], "list");
    }

    #[tokio::test]
    async fn test_create_binding_posts_binding() {
        let binding = user_binding("u-u-role", "u-role", "u");
        let mock = MockService::new().on_post(
            BINDINGS,
            201,
            &serde_json::to_string(&binding).unwrap(),
        );
        let rbac = RbacClient::new(mock.client());

        rbac.create_binding("u-u-role", "u-role", "u").await.unwrap();

        let requests = mock.mutations();
        assert_eq!(requests.len(), 1);
        let body = requests[0].json();
        assert_eq!(body["roleRef"]["name"], "u-role");
        assert_eq!(body["subjects"][0]["name"], "u");
    }

    #[tokio::test]
    async fn test_delete_role_and_binding() {
        let mock = MockService::new()
            .on_delete(&format!("{}/u-role", ROLES), 200, &deleted_json("u-role"))
            .on_delete(&format!("{}/u-u-role", BINDINGS), 200, &deleted_json("u-u-role"));
        let rbac = RbacClient::new(mock.client());

        rbac.delete_binding("u-u-role").await.unwrap();
        rbac.delete_role("u-role").await.unwrap();

        assert_eq!(mock.count("DELETE", &format!("{}/u-role", ROLES)), 1);
        assert_eq!(mock.count("DELETE", &format!("{}/u-u-role", BINDINGS)), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_is_command_failure() {
        let mock = MockService::new();
        let rbac = RbacClient::new(mock.client());

        let err = rbac.delete_role("missing").await.unwrap_err();
        assert!(matches!(err, crate::error::LookoutError::CommandFailure(_)));
    }
}
