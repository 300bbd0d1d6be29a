// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-kind readiness predicates over the last observed object state.

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use kube::api::DynamicObject;

/// Whether an observed object is usable/serving
pub trait Readiness {
    fn is_ready(&self) -> bool;
}

impl Readiness for Pod {
    fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .is_some_and(|phase| phase == "Running")
    }
}

impl Readiness for Deployment {
    fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.ready_replicas.unwrap_or(0) == s.replicas.unwrap_or(0))
    }
}

impl Readiness for ReplicaSet {
    fn is_ready(&self) -> bool {
        // spec.replicas defaults to 1 when omitted
        let desired = self.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1);
        self.status
            .as_ref()
            .is_some_and(|s| s.ready_replicas.unwrap_or(0) == desired)
    }
}

impl Readiness for StatefulSet {
    fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.ready_replicas.unwrap_or(0) == s.replicas)
    }
}

impl Readiness for DaemonSet {
    fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.number_ready == s.desired_number_scheduled)
    }
}

impl Readiness for Service {
    fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref())
            .is_some_and(|ingress| !ingress.is_empty())
    }
}

impl Readiness for Namespace {
    fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .is_some_and(|phase| phase == "Active")
    }
}

// Existence is readiness for these kinds.
impl Readiness for ClusterRole {
    fn is_ready(&self) -> bool {
        true
    }
}

impl Readiness for ClusterRoleBinding {
    fn is_ready(&self) -> bool {
        true
    }
}

impl Readiness for DynamicObject {
    fn is_ready(&self) -> bool {
        true
    }
}
