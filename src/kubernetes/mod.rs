// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster connection, manifest decoding and manifest deployment.

pub mod client;
pub mod deployer;
pub mod manifest;

pub use client::ClusterClient;
pub use deployer::Deployer;
pub use manifest::Manifest;
