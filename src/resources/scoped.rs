// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle calls against one `Api<K>`, logging failures with their context.

use crate::constants::FIELD_MANAGER;
use crate::error::{ApiFailure, ApiResult};
use crate::resources::readiness::Readiness;
use k8s_openapi::api::autoscaling::v1::Scale;
use kube::api::{
    Api, DeleteParams, ListParams, ObjectList, Patch, PatchParams, PostParams, ResourceExt,
};
use kube::core::response::Status;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error};

/// Echo of a delete call
#[derive(Debug, Clone)]
pub enum Deletion<K> {
    /// The object still exists, e.g. while finalizers run
    Pending(K),
    /// The object is gone
    Finished(Status),
}

impl<K> Deletion<K> {
    pub fn is_finished(&self) -> bool {
        matches!(self, Deletion::Finished(_))
    }
}

pub(crate) struct ScopedApi<K> {
    api: Api<K>,
    kind: String,
    namespace: Option<String>,
}

impl<K> ScopedApi<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    pub(crate) fn new(api: Api<K>, kind: impl Into<String>, namespace: Option<&str>) -> Self {
        ScopedApi {
            api,
            kind: kind.into(),
            namespace: namespace.map(str::to_string),
        }
    }

    pub(crate) async fn get(&self, name: &str) -> ApiResult<K> {
        self.api
            .get(name)
            .await
            .map_err(|e| self.failed("get", Some(name), e))
    }

    pub(crate) async fn list(&self) -> ApiResult<ObjectList<K>> {
        self.api
            .list(&ListParams::default())
            .await
            .map_err(|e| self.failed("list", None, e))
    }

    pub(crate) async fn create(&self, body: &K) -> ApiResult<K> {
        let created = self
            .api
            .create(&PostParams::default(), body)
            .await
            .map_err(|e| self.failed("create", Some(&display_name(body)), e))?;
        debug!("Created {} {}{}", self.kind, created.name_any(), self.scope());
        Ok(created)
    }

    pub(crate) async fn delete(&self, name: &str) -> ApiResult<Deletion<K>> {
        let deletion = self
            .api
            .delete(name, &DeleteParams::default())
            .await
            .map_err(|e| self.failed("delete", Some(name), e))?;
        Ok(deletion.either(Deletion::Pending, Deletion::Finished))
    }

    pub(crate) async fn patch<P: Serialize + Debug>(
        &self,
        name: &str,
        patch: &Patch<P>,
    ) -> ApiResult<K> {
        self.api
            .patch(name, &patch_params(patch), patch)
            .await
            .map_err(|e| self.failed("patch", Some(name), e))
    }

    pub(crate) async fn update(&self, name: &str, body: &K) -> ApiResult<K> {
        self.api
            .replace(name, &PostParams::default(), body)
            .await
            .map_err(|e| self.failed("update", Some(name), e))
    }

    pub(crate) async fn scale(&self, name: &str, replicas: i32) -> ApiResult<Scale> {
        let patch = Patch::Merge(serde_json::json!({ "spec": { "replicas": replicas } }));
        self.api
            .patch_scale(name, &PatchParams::default(), &patch)
            .await
            .map_err(|e| self.failed("scale", Some(name), e))
    }

    fn failed(&self, operation: &str, name: Option<&str>, err: kube::Error) -> ApiFailure {
        let failure = ApiFailure::from(err);
        match name {
            Some(name) => error!(
                "Failed to {} {} {}{}: {}",
                operation,
                self.kind,
                name,
                self.scope(),
                failure
            ),
            None => error!(
                "Failed to {} {}{}: {}",
                operation,
                self.kind,
                self.scope(),
                failure
            ),
        }
        failure
    }

    fn scope(&self) -> String {
        self.namespace
            .as_ref()
            .map(|ns| format!(" in namespace {}", ns))
            .unwrap_or_default()
    }
}

impl<K> ScopedApi<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug + Readiness,
{
    /// A failed lookup counts as not ready
    pub(crate) async fn is_ready(&self, name: &str) -> bool {
        self.get(name).await.is_ok_and(|obj| obj.is_ready())
    }
}

fn patch_params<P: Serialize>(patch: &Patch<P>) -> PatchParams {
    match patch {
        Patch::Apply(_) => PatchParams::apply(FIELD_MANAGER),
        _ => PatchParams::default(),
    }
}

fn display_name<K: Resource>(obj: &K) -> String {
    let meta = obj.meta();
    meta.name
        .clone()
        .or_else(|| meta.generate_name.clone())
        .unwrap_or_default()
}
