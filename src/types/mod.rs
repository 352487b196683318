// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Plain data types: derived names, role rules, source and output kubeconfigs.

pub mod identity;
pub mod kubeconfig;
pub mod role;
pub mod source;

pub use identity::IdentityNames;
pub use kubeconfig::OutputKubeconfig;
pub use role::{RoleRule, RoleSource, RoleSpec};
pub use source::SourceClusterConfig;
