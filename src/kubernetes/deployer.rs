// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create and delete every object of a manifest file, whatever its kind.

use crate::error::{ApiFailure, Error, Result};
use crate::kubernetes::manifest::{gvk_of, Manifest};
use crate::resources::scoped::ScopedApi;
use kube::api::DynamicObject;
use kube::core::GroupVersion;
use kube::discovery::{pinned_group, ApiGroup, Scope};
use kube::{Api, Client, ResourceExt};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Applies manifests through API discovery so that any installed kind,
/// custom resources included, can be created or deleted.
#[derive(Clone)]
pub struct Deployer {
    client: Client,
    default_namespace: String,
}

/// API groups discovered while working through one manifest, keyed by
/// apiVersion
#[derive(Default)]
struct DiscoveredGroups {
    groups: HashMap<String, ApiGroup>,
}

impl Deployer {
    pub fn new(client: Client, default_namespace: impl Into<String>) -> Self {
        Deployer {
            client,
            default_namespace: default_namespace.into(),
        }
    }

    /// Create the objects of a manifest in document order.
    ///
    /// Namespaced objects without a namespace of their own go to `namespace`
    /// (or the default namespace). Every object is attempted; when any fails,
    /// [`Error::ManifestCreate`] carries the objects that were created.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn create_from_manifest(
        &self,
        path: impl AsRef<Path>,
        namespace: Option<&str>,
    ) -> Result<Vec<DynamicObject>> {
        info!("Creating from manifest {}", path.as_ref().display());
        let manifest = Manifest::load(path).await?;
        self.create_all(&manifest, namespace).await
    }

    /// Delete the objects of a manifest.
    ///
    /// Every object is attempted; each failure is logged and the first one is
    /// returned once all deletions ran.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn delete_from_manifest(
        &self,
        path: impl AsRef<Path>,
        namespace: Option<&str>,
    ) -> Result<()> {
        info!("Deleting from manifest {}", path.as_ref().display());
        let manifest = Manifest::load(path).await?;
        self.delete_all(&manifest, namespace).await
    }

    pub async fn create_all(
        &self,
        manifest: &Manifest,
        namespace: Option<&str>,
    ) -> Result<Vec<DynamicObject>> {
        let mut discovered = DiscoveredGroups::default();
        let mut created = Vec::with_capacity(manifest.objects().len());
        let mut failures = Vec::new();

        for obj in manifest.objects() {
            match self.create_one(&mut discovered, obj, namespace).await {
                Ok(obj) => created.push(obj),
                Err(e) => {
                    error!("Failed to create object from manifest: {}", e);
                    failures.push(e);
                }
            }
        }

        info!(
            "Created {} of {} objects",
            created.len(),
            manifest.objects().len()
        );
        let failed = failures.len();
        match failures.into_iter().next() {
            Some(first) => Err(Error::ManifestCreate {
                created,
                failed,
                first: Box::new(first),
            }),
            None => Ok(created),
        }
    }

    pub async fn delete_all(&self, manifest: &Manifest, namespace: Option<&str>) -> Result<()> {
        let mut discovered = DiscoveredGroups::default();
        let mut first_failure = None;
        for obj in manifest.objects() {
            if let Err(e) = self.delete_one(&mut discovered, obj, namespace).await {
                error!("Failed to delete object from manifest: {}", e);
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn create_one(
        &self,
        discovered: &mut DiscoveredGroups,
        obj: &DynamicObject,
        namespace: Option<&str>,
    ) -> Result<DynamicObject> {
        let api = self.api_for(discovered, obj, namespace).await?;
        Ok(api.create(obj).await?)
    }

    async fn delete_one(
        &self,
        discovered: &mut DiscoveredGroups,
        obj: &DynamicObject,
        namespace: Option<&str>,
    ) -> Result<()> {
        let Some(name) = obj.metadata.name.as_deref() else {
            return Err(Error::Manifest(
                "cannot delete an object without metadata.name".to_string(),
            ));
        };
        self.api_for(discovered, obj, namespace)
            .await?
            .delete(name)
            .await?;
        Ok(())
    }

    /// Resolve the object's kind through discovery and scope the API to the
    /// right namespace.
    async fn api_for(
        &self,
        discovered: &mut DiscoveredGroups,
        obj: &DynamicObject,
        namespace: Option<&str>,
    ) -> Result<ScopedApi<DynamicObject>> {
        let gvk = gvk_of(obj)?;
        let api_version = if gvk.group.is_empty() {
            gvk.version.clone()
        } else {
            format!("{}/{}", gvk.group, gvk.version)
        };

        let group = match discovered.groups.entry(api_version.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Discovering API group {}", entry.key());
                let gv = GroupVersion::gv(&gvk.group, &gvk.version);
                let group = pinned_group(&self.client, &gv).await.map_err(|e| {
                    error!("Failed to discover {}: {}", entry.key(), e);
                    Error::from(ApiFailure::from(e))
                })?;
                entry.insert(group)
            }
        };

        let Some((resource, capabilities)) = group.recommended_kind(&gvk.kind) else {
            return Err(Error::Manifest(format!(
                "no kind {} served in {}",
                gvk.kind, api_version
            )));
        };

        Ok(match capabilities.scope {
            Scope::Namespaced => {
                let target = obj
                    .namespace()
                    .or_else(|| namespace.map(str::to_string))
                    .unwrap_or_else(|| self.default_namespace.clone());
                ScopedApi::new(
                    Api::namespaced_with(self.client.clone(), &target, &resource),
                    resource.kind.clone(),
                    Some(&target),
                )
            }
            Scope::Cluster => ScopedApi::new(
                Api::all_with(self.client.clone(), &resource),
                resource.kind.clone(),
                None,
            ),
        })
    }
}
