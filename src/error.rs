// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookoutError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("ClusterRole '{0}' was specified but does not exist")]
    RoleNotFound(String),

    #[error("Failed to check whether {kind} '{name}' exists: {source}")]
    UnexpectedQueryFailure {
        kind: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("CertificateSigningRequest '{0}' not found after submission")]
    CsrNotFound(String),

    #[error("Timed out after {waited:?} waiting for certificate of CertificateSigningRequest '{name}'")]
    CertificateTimeout { name: String, waited: Duration },

    #[error("CertificateSigningRequest '{name}' was not signed: {reason}")]
    CertificateRejected { name: String, reason: String },

    #[error("Kubernetes API error: {0}")]
    CommandFailure(#[from] kube::Error),

    #[error("Aborted by user: {0}")]
    UserAbort(String),

    #[error("Failed to read confirmation: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Failed to generate key pair or certificate request: {0}")]
    KeyGenerationError(#[from] rcgen::Error),

    #[error("Serialization failed: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for LookoutError {
    fn from(e: serde_json::Error) -> Self {
        LookoutError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for LookoutError {
    fn from(e: serde_yaml::Error) -> Self {
        LookoutError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookoutError>;
