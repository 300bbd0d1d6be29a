// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Multi-document YAML manifests decoded into dynamic objects.

use crate::error::{Error, Result};
use kube::api::{DynamicObject, GroupVersionKind, TypeMeta};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The objects described by a manifest file, in document order
#[derive(Debug, Clone)]
pub struct Manifest {
    source: PathBuf,
    objects: Vec<DynamicObject>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::ManifestIo {
                path: path.to_path_buf(),
                source,
            })?;

        let objects = parse_documents(&contents)
            .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded {} objects from {}", objects.len(), path.display());

        Ok(Manifest {
            source: path.to_path_buf(),
            objects,
        })
    }

    /// Parse manifest text that did not come from a file
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(Manifest {
            source: PathBuf::new(),
            objects: parse_documents(contents).map_err(Error::Manifest)?,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn objects(&self) -> &[DynamicObject] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Group/version/kind of a manifest object
pub fn gvk_of(obj: &DynamicObject) -> Result<GroupVersionKind> {
    let types = obj
        .types
        .as_ref()
        .ok_or_else(|| Error::Manifest("object is missing apiVersion and kind".to_string()))?;
    let (group, version) = parse_api_version(&types.api_version);
    Ok(GroupVersionKind::gvk(group, version, &types.kind))
}

/// Split an apiVersion into (group, version); the core group is empty
pub fn parse_api_version(api_version: &str) -> (&str, &str) {
    api_version.split_once('/').unwrap_or(("", api_version))
}

fn parse_documents(contents: &str) -> std::result::Result<Vec<DynamicObject>, String> {
    let mut objects = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(contents).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| format!("document {}: {}", index, e))?;
        if value.is_null() {
            continue;
        }
        collect_objects(value, index, &mut objects)?;
    }
    Ok(objects)
}

fn collect_objects(
    value: serde_yaml::Value,
    index: usize,
    objects: &mut Vec<DynamicObject>,
) -> std::result::Result<(), String> {
    // `v1/List`, `ConfigMapList`, ... carry their objects under `items`
    let kind = value.get("kind").and_then(|k| k.as_str()).unwrap_or_default();
    if kind.ends_with("List") {
        if let Some(items) = value.get("items").and_then(|i| i.as_sequence()) {
            for item in items {
                collect_objects(item.clone(), index, objects)?;
            }
            return Ok(());
        }
    }

    let obj: DynamicObject =
        serde_yaml::from_value(value).map_err(|e| format!("document {}: {}", index, e))?;
    match &obj.types {
        Some(TypeMeta { kind, .. }) if !kind.is_empty() => {
            objects.push(obj);
            Ok(())
        }
        _ => Err(format!("document {} is missing apiVersion or kind", index)),
    }
}
