// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// User provisioned when none is given on the command line
pub const DEFAULT_USER: &str = "qa-monitor";

/// Namespace set on the generated context
pub const DEFAULT_CONTEXT_NAMESPACE: &str = "default";

/// The field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "lookout";

/// CertificateSigningRequest settings
pub mod csr {
    /// Signer for client certificates trusted by the API server
    pub const SIGNER_NAME: &str = "kubernetes.io/kube-apiserver-client";
    /// Key usage requested for the issued certificate
    pub const USAGE_CLIENT_AUTH: &str = "client auth";
    /// Reason recorded on the Approved condition
    pub const APPROVAL_REASON: &str = "LookoutApproved";
    /// Message recorded on the Approved condition
    pub const APPROVAL_MESSAGE: &str = "This certificate was approved by lookout";
}

/// Certificate approval polling configuration
pub mod approval {
    /// Interval between status reads while waiting for the signed certificate
    pub const POLL_INTERVAL_SECS: u64 = 5;
    /// Give up waiting for the signed certificate after this many seconds
    pub const TIMEOUT_SECS: u64 = 300;
    /// Largest accepted approval timeout (one day)
    pub const MAX_TIMEOUT_SECS: u64 = 86_400;
    /// Largest accepted poll interval
    pub const MAX_POLL_INTERVAL_SECS: u64 = 3_600;
}
