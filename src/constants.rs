// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

/// Field manager used for server-side apply patches
pub const FIELD_MANAGER: &str = "kubeclient";

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "default";

/// Condition polling defaults
pub mod wait {
    use super::Duration;

    /// A zero timeout checks the condition exactly once
    pub const DEFAULT_TIMEOUT: Duration = Duration::ZERO;
    /// Delay between two evaluations of a condition
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
}

/// Environment variables read by [`crate::config::Config::from_env`]
pub mod env {
    pub const KUBECONFIG: &str = "KUBECLIENT_KUBECONFIG";
    pub const CONTEXT: &str = "KUBECLIENT_CONTEXT";
    pub const NAMESPACE: &str = "KUBECLIENT_NAMESPACE";
}
