// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, existence checks, RBAC and CSR handling.

pub mod client;
pub mod csr;
pub mod exists;
pub mod rbac;

pub use client::create_client;
pub use exists::resource_exists;
