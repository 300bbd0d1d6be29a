// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespaced custom resources addressed by group, version and plural.

use crate::condition::WaitParams;
use crate::error::{ApiResult, Error, Result};
use crate::kubernetes::deployer::Deployer;
use crate::resources::scoped::{Deletion, ScopedApi};
use crate::resources::wait_until;
use kube::api::{ApiResource, DynamicObject, ObjectList, Patch};
use kube::{Api, Client};
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use tracing::instrument;

const KIND_LABEL: &str = "CustomResource";

/// Lifecycle controller for one custom resource type.
///
/// Objects are handled as [`DynamicObject`]s; a custom resource is ready as
/// soon as it exists.
#[derive(Clone)]
pub struct CustomResources {
    client: Client,
    resource: ApiResource,
}

impl CustomResources {
    pub fn new(client: Client, group: &str, version: &str, plural: &str) -> Result<Self> {
        if version.trim().is_empty() || plural.trim().is_empty() {
            return Err(Error::InvalidCoordinates(format!(
                "version and plural are required (group={:?}, version={:?}, plural={:?})",
                group, version, plural
            )));
        }

        let api_version = if group.is_empty() {
            version.to_string()
        } else {
            format!("{}/{}", group, version)
        };

        Ok(CustomResources {
            client,
            resource: ApiResource {
                group: group.to_string(),
                version: version.to_string(),
                api_version,
                kind: String::new(),
                plural: plural.to_string(),
            },
        })
    }

    /// Kind reported in log lines and wait names instead of `CustomResource`
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.resource.kind = kind.to_string();
        self
    }

    pub fn group(&self) -> &str {
        &self.resource.group
    }

    pub fn version(&self) -> &str {
        &self.resource.version
    }

    pub fn plural(&self) -> &str {
        &self.resource.plural
    }

    fn scoped(&self, namespace: &str) -> ScopedApi<DynamicObject> {
        ScopedApi::new(
            Api::namespaced_with(self.client.clone(), namespace, &self.resource),
            self.label(),
            Some(namespace),
        )
    }

    fn label(&self) -> String {
        if self.resource.kind.is_empty() {
            KIND_LABEL.to_string()
        } else {
            self.resource.kind.clone()
        }
    }

    pub async fn get(&self, namespace: &str, name: &str) -> ApiResult<DynamicObject> {
        self.scoped(namespace).get(name).await
    }

    pub async fn list(&self, namespace: &str) -> ApiResult<ObjectList<DynamicObject>> {
        self.scoped(namespace).list().await
    }

    pub async fn create(&self, namespace: &str, body: &DynamicObject) -> ApiResult<DynamicObject> {
        self.scoped(namespace).create(body).await
    }

    pub async fn delete(
        &self,
        namespace: &str,
        name: &str,
    ) -> ApiResult<Deletion<DynamicObject>> {
        self.scoped(namespace).delete(name).await
    }

    pub async fn patch<P: Serialize + Debug>(
        &self,
        namespace: &str,
        name: &str,
        patch: &Patch<P>,
    ) -> ApiResult<DynamicObject> {
        self.scoped(namespace).patch(name, patch).await
    }

    pub async fn update(
        &self,
        namespace: &str,
        name: &str,
        body: &DynamicObject,
    ) -> ApiResult<DynamicObject> {
        self.scoped(namespace).update(name, body).await
    }

    /// Create every object of a manifest file, custom resources and any other
    /// kind alike. Namespaced objects without a namespace land in `namespace`.
    #[instrument(skip(self, path), fields(plural = %self.resource.plural))]
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

    #[instrument(skip(self, params), fields(plural = %self.resource.plural))]
    pub async fn wait_for_ready(
        &self,
        namespace: &str,
        name: &str,
        params: &WaitParams,
    ) -> Result<bool> {
        wait_until(
            format!(
                "{} {} in namespace {} to be ready",
                self.label(),
                name,
                namespace
            ),
            params,
            || self.is_ready(namespace, name),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{api_resource_list_json, not_found_json, MockService};
    use kube::ResourceExt;
    use std::time::Duration;

    const WIDGET_PATH: &str = "/apis/example.com/v1/namespaces/default/widgets/w1";

    fn widget_json(name: &str) -> String {
        serde_json::json!({
            "apiVersion": "example.com/v1",
            "kind": "Widget",
            "metadata": { "name": name, "namespace": "default" },
            "spec": { "size": 3 }
        })
        .to_string()
    }

    fn widgets(mock: &MockService) -> CustomResources {
        CustomResources::new(mock.clone().into_client(), "example.com", "v1", "widgets").unwrap()
    }

    #[tokio::test]
    async fn test_requires_version_and_plural() {
        let client = MockService::new().into_client();
        assert!(matches!(
            CustomResources::new(client.clone(), "example.com", "", "widgets"),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(matches!(
            CustomResources::new(client, "example.com", "v1", " "),
            Err(Error::InvalidCoordinates(_))
        ));
    }

    #[tokio::test]
    async fn test_coordinates_are_kept() {
        let mock = MockService::new();
        let resources = widgets(&mock);
        assert_eq!(resources.group(), "example.com");
        assert_eq!(resources.version(), "v1");
        assert_eq!(resources.plural(), "widgets");
    }

    #[tokio::test]
    async fn test_get_uses_plural_path() {
        let mock = MockService::new().on_get(WIDGET_PATH, 200, &widget_json("w1"));

        let widget = widgets(&mock).get("default", "w1").await.unwrap();
        assert_eq!(widget.data["spec"]["size"], 3);
    }

    #[tokio::test]
    async fn test_ready_means_exists() {
        let mock = MockService::new()
            .on_get(WIDGET_PATH, 404, &not_found_json("widgets", "w1"))
            .on_get(WIDGET_PATH, 200, &widget_json("w1"));
        let resources = widgets(&mock);

        assert!(!resources.is_ready("default", "w1").await);
        assert!(resources.is_ready("default", "w1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_ready_is_cancellable() {
        let mock = MockService::new();
        let resources = widgets(&mock);
        let token = tokio_util::sync::CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(750)).await;
            canceller.cancel();
        });

        let params = WaitParams::new(Duration::from_secs(3600), Duration::from_millis(500))
            .cancel_on(token);
        assert!(!resources.wait_for_ready("default", "w1", &params).await.unwrap());
        assert_eq!(mock.count("GET", WIDGET_PATH), 2);
    }

    #[tokio::test]
    async fn test_create_from_manifest_creates_every_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"
apiVersion: example.com/v1
kind: Widget
metadata:
  name: w1
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: widget-settings
"#,
        )
        .unwrap();

        let mock = MockService::new()
            .on_get(
                "/apis/example.com/v1",
                200,
                &api_resource_list_json("example.com/v1", "widgets", "Widget", true),
            )
            .on_get(
                "/api/v1",
                200,
                &api_resource_list_json("v1", "configmaps", "ConfigMap", true),
            )
            .on_post(
                "/apis/example.com/v1/namespaces/default/widgets",
                201,
                &widget_json("w1"),
            )
            .on_post(
                "/api/v1/namespaces/default/configmaps",
                201,
                r#"{"apiVersion":"v1","kind":"ConfigMap","metadata":{"name":"widget-settings"}}"#,
            );
        let created = widgets(&mock)
            .with_kind("Widget")
            .create_from_manifest("default", file.path())
            .await
            .unwrap();

        let names: Vec<_> = created.iter().map(|o| o.name_any()).collect();
        assert_eq!(names, vec!["w1", "widget-settings"]);
        assert_eq!(
            mock.count("POST", "/apis/example.com/v1/namespaces/default/widgets"),
            1
        );
        assert_eq!(mock.count("POST", "/api/v1/namespaces/default/configmaps"), 1);
    }
}
