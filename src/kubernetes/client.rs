// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shared cluster connection handing out per-kind controllers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kubernetes::deployer::Deployer;
use crate::resources::{
    ClusterRoleBindings, ClusterRoles, CustomResources, DaemonSets, Deployments, Namespaces,
    Pods, ReplicaSets, Services, StatefulSets,
};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{info, instrument};

/// One connection to a cluster; every controller created from it shares the
/// same underlying client.
#[derive(Clone)]
pub struct ClusterClient {
    client: Client,
    default_namespace: String,
}

impl ClusterClient {
    /// Connect using the configured kubeconfig, or infer the configuration
    /// (`KUBECONFIG`, `~/.kube/config`, in-cluster service account).
    #[instrument(skip(config), fields(kubeconfig = ?config.kubeconfig, context = ?config.context))]
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = KubeConfigOptions {
            context: config.context.clone(),
            ..Default::default()
        };

        let kube_config = match &config.kubeconfig {
            Some(path) => {
                info!("Loading Kubernetes configuration from {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    Error::Kubeconfig(format!("Failed to read {}: {}", path.display(), e))
                })?;
                KConfig::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| Error::Kubeconfig(format!("Failed to create config: {}", e)))?
            }
            None if config.context.is_some() => {
                info!("Loading Kubernetes configuration from default location");
                KConfig::from_kubeconfig(&options)
                    .await
                    .map_err(|e| Error::Kubeconfig(format!("Failed to create config: {}", e)))?
            }
            None => {
                info!("Inferring Kubernetes configuration");
                KConfig::infer()
                    .await
                    .map_err(|e| Error::Kubeconfig(format!("Failed to infer config: {}", e)))?
            }
        };

        let client = Client::try_from(kube_config)
            .map_err(|e| Error::Kubeconfig(format!("Failed to create client: {}", e)))?;
        info!("Connected to Kubernetes cluster");

        Ok(Self::new(client, config.default_namespace.clone()))
    }

    pub fn new(client: Client, default_namespace: impl Into<String>) -> Self {
        ClusterClient {
            client,
            default_namespace: default_namespace.into(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn pods(&self) -> Pods {
        Pods::new(self.client.clone())
    }

    pub fn deployments(&self) -> Deployments {
        Deployments::new(self.client.clone())
    }

    pub fn services(&self) -> Services {
        Services::new(self.client.clone())
    }

    pub fn daemon_sets(&self) -> DaemonSets {
        DaemonSets::new(self.client.clone())
    }

    pub fn replica_sets(&self) -> ReplicaSets {
        ReplicaSets::new(self.client.clone())
    }

    pub fn stateful_sets(&self) -> StatefulSets {
        StatefulSets::new(self.client.clone())
    }

    pub fn namespaces(&self) -> Namespaces {
        Namespaces::new(self.client.clone())
    }

    pub fn cluster_roles(&self) -> ClusterRoles {
        ClusterRoles::new(self.client.clone())
    }

    pub fn cluster_role_bindings(&self) -> ClusterRoleBindings {
        ClusterRoleBindings::new(self.client.clone())
    }

    pub fn custom_resources(
        &self,
        group: &str,
        version: &str,
        plural: &str,
    ) -> Result<CustomResources> {
        CustomResources::new(self.client.clone(), group, version, plural)
    }

    /// Manifest deployer targeting the default namespace
    pub fn deployer(&self) -> Deployer {
        Deployer::new(self.client.clone(), self.default_namespace.clone())
    }
}
