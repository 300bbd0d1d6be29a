// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle controllers for cluster resources.
//!
//! Every controller exposes the same verbs (get, list, create, delete, patch,
//! update, create_from_manifest, is_ready, wait_for_ready). Namespaced kinds
//! take the namespace as first argument, cluster-scoped kinds don't.

pub mod cluster;
pub mod custom;
pub mod namespaced;
pub mod readiness;
pub mod scoped;

pub use cluster::ClusterResource;
pub use custom::CustomResources;
pub use namespaced::{NamespacedResource, Scalable};
pub use readiness::Readiness;
pub use scoped::Deletion;

use crate::condition::{Condition, WaitParams};
use crate::error::Result;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use std::convert::Infallible;
use std::future::Future;
use tracing::info;

pub type Pods = NamespacedResource<Pod>;
pub type Deployments = NamespacedResource<Deployment>;
pub type Services = NamespacedResource<Service>;
pub type DaemonSets = NamespacedResource<DaemonSet>;
pub type ReplicaSets = NamespacedResource<ReplicaSet>;
pub type StatefulSets = NamespacedResource<StatefulSet>;
pub type Namespaces = ClusterResource<Namespace>;
pub type ClusterRoles = ClusterResource<ClusterRole>;
pub type ClusterRoleBindings = ClusterResource<ClusterRoleBinding>;

/// Poll `is_ready` as a named condition using the given wait parameters
pub(crate) async fn wait_until<F, Fut>(
    name: String,
    params: &WaitParams,
    mut is_ready: F,
) -> Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let check = move || {
        let ready = is_ready();
        async move { Ok::<_, Infallible>(ready.await) }
    };

    let mut condition = Condition::new(name, check, params.timeout, params.interval)?;
    if let Some(token) = &params.cancel {
        condition = condition.with_cancellation(token.clone());
    }

    info!("Waiting for {}", condition.name());
    Ok(condition.wait().await.unwrap_or_else(|never| match never {}))
}
