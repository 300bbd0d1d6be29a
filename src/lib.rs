// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod condition;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod logging;
pub mod resources;

#[cfg(test)]
pub mod test_utils;

pub use condition::{Condition, WaitParams};
pub use error::{ApiFailure, ApiResult, Error, Result};
pub use kubernetes::{ClusterClient, Deployer, Manifest};
