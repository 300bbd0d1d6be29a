// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, DEFAULT_NAMESPACE};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit kubeconfig file; when unset the configuration is inferred
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
    pub default_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            kubeconfig: None,
            context: None,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let kubeconfig = non_empty_var(vars::KUBECONFIG)?.map(PathBuf::from);
        if let Some(path) = &kubeconfig {
            if !path.is_file() {
                anyhow::bail!(
                    "{} points to {}, which is not a file",
                    vars::KUBECONFIG,
                    path.display()
                );
            }
        }

        let context = non_empty_var(vars::CONTEXT)?;
        let default_namespace =
            non_empty_var(vars::NAMESPACE)?.unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        Ok(Config {
            kubeconfig,
            context,
            default_namespace,
        })
    }
}

fn non_empty_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} environment variable is not valid", key)),
    }
}
