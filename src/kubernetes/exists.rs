// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource existence checks

use crate::error::{LookoutError, Result};
use kube::{Api, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, instrument};

/// Check whether a named resource exists.
///
/// `api` decides the scope: `Api::all` for cluster-scoped resources,
/// `Api::namespaced` for namespaced ones. Only a NotFound answer means
/// absent; anything else (RBAC denial, connection failure) is an error.
#[instrument(skip(api), fields(kind = %K::kind(&())))]
pub async fn resource_exists<K>(api: &Api<K>, name: &str) -> Result<bool>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
{
    match api.get(name).await {
        Ok(_) => {
            debug!("{} {} exists", K::kind(&()), name);
            Ok(true)
        }
        Err(e) if is_not_found(&e) => {
            debug!("{} {} does not exist", K::kind(&()), name);
            Ok(false)
        }
        Err(e) => Err(LookoutError::UnexpectedQueryFailure {
            kind: K::kind(&()).to_string(),
            name: name.to_string(),
            source: e,
        }),
    }
}

/// Whether the API server answered NotFound
pub fn is_not_found(error: &kube::Error) -> bool {
    match error {
        kube::Error::Api(response) => response.code == 404 || response.reason == "NotFound",
        _ => false,
    }
}
