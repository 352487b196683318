// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CertificateSigningRequest submission, approval and polling

use crate::constants::csr::{APPROVAL_MESSAGE, APPROVAL_REASON, SIGNER_NAME, USAGE_CLIENT_AUTH};
use crate::error::{LookoutError, Result};
use crate::pki::CertificateRequest;
use k8s_openapi::api::certificates::v1::{
    CertificateSigningRequest, CertificateSigningRequestCondition, CertificateSigningRequestSpec,
    CertificateSigningRequestStatus,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::chrono::Utc;
use k8s_openapi::ByteString;
use kube::{
    api::{DeleteParams, ListParams, ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

/// How long to wait for the signed certificate
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

/// Observed progress of a submitted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsrStatus {
    Pending,
    Signed(Vec<u8>),
    Rejected(String),
}

pub struct CsrClient {
    api: Api<CertificateSigningRequest>,
}

impl CsrClient {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }

    /// Delete a leftover request with this name, if any
    #[instrument(skip(self))]
    pub async fn delete_if_exists(&self, name: &str) -> Result<bool> {
        if !super::resource_exists(&self.api, name).await? {
            return Ok(false);
        }
        warn!("Deleting existing CertificateSigningRequest '{}'", name);
        self.api.delete(name, &DeleteParams::default()).await?;
        Ok(true)
    }

    /// Submit the request for signing by the cluster's client CA
    #[instrument(skip(self, request), fields(csr = %request.name()))]
    pub async fn submit(
        &self,
        request: &mut CertificateRequest,
        expiration_seconds: Option<i32>,
    ) -> Result<()> {
        info!("Submitting CertificateSigningRequest '{}'", request.name());
        let csr = client_auth_request(request, expiration_seconds);
        self.api.create(&PostParams::default(), &csr).await?;
        request.mark_submitted();
        Ok(())
    }

    /// Make sure the submitted request can be read back
    #[instrument(skip(self))]
    pub async fn verify_visible(&self, name: &str) -> Result<()> {
        let lp = ListParams::default().fields(&format!("metadata.name={}", name));
        let list = self.api.list(&lp).await?;

        if list.items.iter().any(|csr| csr.name_any() == name) {
            debug!("CertificateSigningRequest '{}' is visible", name);
            Ok(())
        } else {
            Err(LookoutError::CsrNotFound(name.to_string()))
        }
    }

    /// Add an Approved condition through the approval subresource
    #[instrument(skip(self, request), fields(csr = %request.name()))]
    pub async fn approve(&self, request: &mut CertificateRequest) -> Result<CsrStatus> {
        info!("Approving CertificateSigningRequest '{}'", request.name());
        let mut csr = self.api.get_status(request.name()).await?;
        add_approval(&mut csr);

        let data = serde_json::to_vec(&csr)?;
        let approved = self
            .api
            .replace_subresource("approval", request.name(), &PostParams::default(), data)
            .await?;
        request.mark_approved();

        Ok(csr_status(&approved))
    }

    /// Poll until the certificate is issued, the request is denied, or the
    /// timeout expires.
    #[instrument(skip(self, settings))]
    pub async fn wait_for_certificate(&self, name: &str, settings: PollSettings) -> Result<Vec<u8>> {
        if settings.interval.is_zero() {
            return Err(LookoutError::ConfigError(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        let started = Instant::now();
        let deadline = started.checked_add(settings.timeout).ok_or_else(|| {
            LookoutError::ConfigError(format!("approval timeout {:?} is too large", settings.timeout))
        })?;

        loop {
            let csr = self.api.get_status(name).await?;
            match csr_status(&csr) {
                CsrStatus::Signed(certificate) => {
                    info!("Certificate for '{}' issued", name);
                    return Ok(certificate);
                }
                CsrStatus::Rejected(reason) => {
                    return Err(LookoutError::CertificateRejected {
                        name: name.to_string(),
                        reason,
                    });
                }
                CsrStatus::Pending => {}
            }

            let next_check = Instant::now().checked_add(settings.interval);
            if next_check.map_or(true, |next| next > deadline) {
                return Err(LookoutError::CertificateTimeout {
                    name: name.to_string(),
                    waited: started.elapsed(),
                });
            }

            debug!(
                "Certificate for '{}' not issued yet, checking again in {:?}",
                name, settings.interval
            );
            sleep(settings.interval).await;
        }
    }
}

fn client_auth_request(
    request: &CertificateRequest,
    expiration_seconds: Option<i32>,
) -> CertificateSigningRequest {
    CertificateSigningRequest {
        metadata: ObjectMeta {
            name: Some(request.name().to_string()),
            ..Default::default()
        },
        spec: CertificateSigningRequestSpec {
            request: ByteString(request.csr_pem().as_bytes().to_vec()),
            signer_name: SIGNER_NAME.to_string(),
            usages: Some(vec![USAGE_CLIENT_AUTH.to_string()]),
            expiration_seconds,
            ..Default::default()
        },
        status: None,
    }
}

fn add_approval(csr: &mut CertificateSigningRequest) {
    let now = Time(Utc::now());
    let status = csr
        .status
        .get_or_insert_with(CertificateSigningRequestStatus::default);
    let conditions = status.conditions.get_or_insert_with(Vec::new);
    conditions.retain(|c| c.type_ != "Approved");
    conditions.push(CertificateSigningRequestCondition {
        type_: "Approved".to_string(),
        status: "True".to_string(),
        reason: Some(APPROVAL_REASON.to_string()),
        message: Some(APPROVAL_MESSAGE.to_string()),
        last_update_time: Some(now.clone()),
        last_transition_time: Some(now),
    });
}

/// Interpret the status of a request: a non-empty certificate wins, a
/// Denied or Failed condition means it will never be signed.
pub fn csr_status(csr: &CertificateSigningRequest) -> CsrStatus {
    let Some(status) = csr.status.as_ref() else {
        return CsrStatus::Pending;
    };

    if let Some(certificate) = status.certificate.as_ref().filter(|c| !c.0.is_empty()) {
        return CsrStatus::Signed(certificate.0.clone());
    }

    let rejection = status.conditions.iter().flatten().find(|c| {
        (c.type_ == "Denied" || c.type_ == "Failed") && c.status == "True"
    });
    match rejection {
        Some(c) => CsrStatus::Rejected(format!(
            "{}: {}",
            c.type_,
            c.message.as_deref().or(c.reason.as_deref()).unwrap_or("no reason given")
        )),
        None => CsrStatus::Pending,
    }
}
