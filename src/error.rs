// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::api::DynamicObject;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single Kubernetes API call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("forbidden ({code}): {message}")]
    Forbidden { code: u16, message: String },

    #[error("rejected ({code}): {message}")]
    Invalid { code: u16, message: String },

    #[error("server error ({code}): {message}")]
    ServerError { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiFailure {
    /// HTTP status code reported by the API server, if the request got that far
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiFailure::NotFound { .. } => Some(404),
            ApiFailure::Conflict { .. } => Some(409),
            ApiFailure::Forbidden { code, .. }
            | ApiFailure::Invalid { code, .. }
            | ApiFailure::ServerError { code, .. } => Some(*code),
            ApiFailure::Transport(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiFailure::NotFound { .. })
    }
}

impl From<kube::Error> for ApiFailure {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => {
                let message = resp.message;
                match resp.code {
                    404 => ApiFailure::NotFound { message },
                    409 => ApiFailure::Conflict { message },
                    code @ (401 | 403) => ApiFailure::Forbidden { code, message },
                    code @ 500..=599 => ApiFailure::ServerError { code, message },
                    code => ApiFailure::Invalid { code, message },
                }
            }
            other => ApiFailure::Transport(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Api(#[from] ApiFailure),

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid custom resource coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    /// Some manifest objects could not be created; `created` holds the ones
    /// that now exist on the cluster.
    #[error("Failed to create {failed} manifest object(s), first failure: {first}")]
    ManifestCreate {
        created: Vec<DynamicObject>,
        failed: usize,
        #[source]
        first: Box<Error>,
    },

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result of a single API round trip
pub type ApiResult<T> = std::result::Result<T, ApiFailure>;
