// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::condition::WaitParams;
use crate::error::{ApiResult, Result};
use crate::kubernetes::deployer::Deployer;
use crate::resources::readiness::Readiness;
use crate::resources::scoped::{Deletion, ScopedApi};
use crate::resources::wait_until;
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v1::Scale;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{DynamicObject, ObjectList, Patch};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::Path;
use tracing::instrument;

/// Kinds whose replica count can be changed through the `scale` subresource
pub trait Scalable {}

impl Scalable for Deployment {}
impl Scalable for ReplicaSet {}
impl Scalable for StatefulSet {}

/// Lifecycle controller for a namespaced kind
pub struct NamespacedResource<K> {
    client: Client,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for NamespacedResource<K> {
    fn clone(&self) -> Self {
        NamespacedResource {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> NamespacedResource<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Serialize
        + Debug
        + Readiness,
    K::DynamicType: Default,
{
    pub fn new(client: Client) -> Self {
        NamespacedResource {
            client,
            _kind: PhantomData,
        }
    }

    /// Kind name as reported by the API, e.g. `Deployment`
    pub fn kind() -> String {
        K::kind(&Default::default()).into_owned()
    }

    fn scoped(&self, namespace: &str) -> ScopedApi<K> {
        ScopedApi::new(
            Api::namespaced(self.client.clone(), namespace),
            Self::kind(),
            Some(namespace),
        )
    }

    pub async fn get(&self, namespace: &str, name: &str) -> ApiResult<K> {
        self.scoped(namespace).get(name).await
    }

    pub async fn list(&self, namespace: &str) -> ApiResult<ObjectList<K>> {
        self.scoped(namespace).list().await
    }

    pub async fn create(&self, namespace: &str, body: &K) -> ApiResult<K> {
        self.scoped(namespace).create(body).await
    }

    pub async fn delete(&self, namespace: &str, name: &str) -> ApiResult<Deletion<K>> {
        self.scoped(namespace).delete(name).await
    }

    pub async fn patch<P: Serialize + Debug>(
        &self,
        namespace: &str,
        name: &str,
        patch: &Patch<P>,
    ) -> ApiResult<K> {
        self.scoped(namespace).patch(name, patch).await
    }

    /// Replace the whole object
    pub async fn update(&self, namespace: &str, name: &str, body: &K) -> ApiResult<K> {
        self.scoped(namespace).update(name, body).await
    }

    /// Create every object of a manifest file, whatever its kind, the way
    /// [`Deployer::create_from_manifest`] does.
    ///
    /// Objects keep the namespace set in the manifest; namespaced objects
    /// without one land in `namespace`.
    #[instrument(skip(self, path), fields(kind = %Self::kind()))]
    pub async fn create_from_manifest(
        &self,
        namespace: &str,
        path: impl AsRef<Path>,
    ) -> Result<Vec<DynamicObject>> {
        Deployer::new(self.client.clone(), namespace)
            .create_from_manifest(path, Some(namespace))
            .await
    }

    pub async fn is_ready(&self, namespace: &str, name: &str) -> bool {
        self.scoped(namespace).is_ready(name).await
    }

    /// Poll [`Self::is_ready`] until it passes, the timeout elapses or the
    /// wait is cancelled. Only an invalid interval is reported as an error.
    #[instrument(skip(self, params), fields(kind = %Self::kind()))]
    pub async fn wait_for_ready(
        &self,
        namespace: &str,
        name: &str,
        params: &WaitParams,
    ) -> Result<bool> {
        wait_until(
            format!("{} {} in namespace {} to be ready", Self::kind(), name, namespace),
            params,
            || self.is_ready(namespace, name),
        )
        .await
    }
}

impl<K> NamespacedResource<K>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Serialize
        + Debug
        + Readiness
        + Scalable,
    K::DynamicType: Default,
{
    /// Set the desired replica count through the scale subresource
    pub async fn scale(&self, namespace: &str, name: &str, replicas: i32) -> ApiResult<Scale> {
        self.scoped(namespace).scale(name, replicas).await
    }
}
