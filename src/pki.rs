// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client key pair and certificate signing request generation.

use crate::error::Result;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
use std::fmt;
use tracing::info;

/// Why a certificate request did not produce a certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Timeout,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Created,
    Submitted,
    Approved,
    Signed,
    Failed(FailureReason),
}

/// A locally generated certificate request for a cluster user.
///
/// The private key never leaves this struct except through
/// [`CertificateRequest::key_pem`], which is only used to embed it in the
/// output kubeconfig.
pub struct CertificateRequest {
    name: String,
    common_name: String,
    key_pem: String,
    csr_pem: String,
    state: RequestState,
}

impl fmt::Debug for CertificateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateRequest")
            .field("name", &self.name)
            .field("common_name", &self.common_name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CertificateRequest {
    /// Generate a fresh key pair and a PEM encoded CSR with subject `CN=<user>`
    /// and, when given, `O=<group>`.
    pub fn generate(name: &str, user: &str, group: Option<&str>) -> Result<Self> {
        info!("Generating key pair and certificate request {}", name);

        let mut params = CertificateParams::default();
        let mut subject = DistinguishedName::new();
        subject.push(DnType::CommonName, user);
        if let Some(group) = group {
            subject.push(DnType::OrganizationName, group);
        }
        params.distinguished_name = subject;

        let key_pair = KeyPair::generate()?;
        let csr = params.serialize_request(&key_pair)?;

        Ok(Self {
            name: name.to_string(),
            common_name: user.to_string(),
            key_pem: key_pair.serialize_pem(),
            csr_pem: csr.pem()?,
            state: RequestState::Created,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    pub fn csr_pem(&self) -> &str {
        &self.csr_pem
    }

    pub fn key_pem(&self) -> &str {
        &self.key_pem
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn mark_submitted(&mut self) {
        self.state = RequestState::Submitted;
    }

    pub fn mark_approved(&mut self) {
        self.state = RequestState::Approved;
    }

    pub fn mark_signed(&mut self) {
        self.state = RequestState::Signed;
    }

    pub fn mark_failed(&mut self, reason: FailureReason) {
        self.state = RequestState::Failed(reason);
    }
}
