// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::condition::WaitParams;
use crate::constants::DEFAULT_NAMESPACE;
use crate::error::{ApiResult, Result};
use crate::kubernetes::deployer::Deployer;
use crate::resources::readiness::Readiness;
use crate::resources::scoped::{Deletion, ScopedApi};
use crate::resources::wait_until;
use k8s_openapi::ClusterResourceScope;
use kube::api::{DynamicObject, ObjectList, Patch};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::Path;
use tracing::instrument;

/// Lifecycle controller for a cluster-scoped kind
pub struct ClusterResource<K> {
    client: Client,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ClusterResource<K> {
    fn clone(&self) -> Self {
        ClusterResource {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> ClusterResource<K>
where
    K: Resource<Scope = ClusterResourceScope>
        + Clone
        + DeserializeOwned
        + Serialize
        + Debug
        + Readiness,
    K::DynamicType: Default,
{
    pub fn new(client: Client) -> Self {
        ClusterResource {
            client,
            _kind: PhantomData,
        }
    }

    pub fn kind() -> String {
        K::kind(&Default::default()).into_owned()
    }

    fn scoped(&self) -> ScopedApi<K> {
        ScopedApi::new(Api::all(self.client.clone()), Self::kind(), None)
    }

    pub async fn get(&self, name: &str) -> ApiResult<K> {
        self.scoped().get(name).await
    }

    pub async fn list(&self) -> ApiResult<ObjectList<K>> {
        self.scoped().list().await
    }

    pub async fn create(&self, body: &K) -> ApiResult<K> {
        self.scoped().create(body).await
    }

    pub async fn delete(&self, name: &str) -> ApiResult<Deletion<K>> {
        self.scoped().delete(name).await
    }

    pub async fn patch<P: Serialize + Debug>(&self, name: &str, patch: &Patch<P>) -> ApiResult<K> {
        self.scoped().patch(name, patch).await
    }

    pub async fn update(&self, name: &str, body: &K) -> ApiResult<K> {
        self.scoped().update(name, body).await
    }

    /// Create every object of a manifest file, whatever its kind. Namespaced
    /// objects without a namespace of their own land in `default`.
    #[instrument(skip(self, path), fields(kind = %Self::kind()))]
    pub async fn create_from_manifest(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<DynamicObject>> {
        Deployer::new(self.client.clone(), DEFAULT_NAMESPACE)
            .create_from_manifest(path, None)
            .await
    }

    pub async fn is_ready(&self, name: &str) -> bool {
        self.scoped().is_ready(name).await
    }

    #[instrument(skip(self, params), fields(kind = %Self::kind()))]
    pub async fn wait_for_ready(&self, name: &str, params: &WaitParams) -> Result<bool> {
        wait_until(
            format!("{} {} to be ready", Self::kind(), name),
            params,
            || self.is_ready(name),
        )
        .await
    }
}
