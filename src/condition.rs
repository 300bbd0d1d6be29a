// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Polling primitive that blocks until a check passes, times out or is cancelled.

use crate::constants::wait::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Timing parameters for a readiness wait
#[derive(Debug, Clone)]
pub struct WaitParams {
    /// How long to keep polling; zero checks exactly once
    pub timeout: Duration,
    pub interval: Duration,
    /// Aborts the wait early when cancelled
    pub cancel: Option<CancellationToken>,
}

impl Default for WaitParams {
    fn default() -> Self {
        WaitParams {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            cancel: None,
        }
    }
}

impl WaitParams {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        WaitParams {
            timeout,
            interval,
            cancel: None,
        }
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// A named check evaluated repeatedly until it returns `true`.
///
/// The check is an async closure returning `Result<bool, E>`. Errors are not
/// retried: they abort [`Condition::wait`] and are handed back to the caller.
pub struct Condition<F> {
    name: String,
    predicate: F,
    timeout: Duration,
    interval: Duration,
    cancel: Option<CancellationToken>,
    last_result: bool,
}

impl<F> Condition<F> {
    /// Build a condition that polls every `interval` until `timeout` has elapsed.
    pub fn new(
        name: impl Into<String>,
        predicate: F,
        timeout: Duration,
        interval: Duration,
    ) -> Result<Self> {
        let name = name.into();
        if interval.is_zero() {
            return Err(Error::InvalidCondition(format!(
                "{}: polling interval must be greater than zero",
                name
            )));
        }

        Ok(Condition {
            name,
            predicate,
            timeout,
            interval,
            cancel: None,
            last_result: false,
        })
    }

    /// Build a condition that is checked a single time
    pub fn once(name: impl Into<String>, predicate: F) -> Self {
        Condition {
            name: name.into(),
            predicate,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            cancel: None,
            last_result: false,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Result of the most recent evaluation, `false` before the first one
    pub fn last_result(&self) -> bool {
        self.last_result
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }
}

impl<F, Fut, E> Condition<F>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<bool, E>>,
{
    /// Poll the check until it passes (`Ok(true)`), the timeout elapses or the
    /// wait is cancelled (`Ok(false)`), or the check fails (`Err`).
    pub async fn wait(&mut self) -> std::result::Result<bool, E> {
        info!("Waiting for condition {} to be true", self.name);
        let start = Instant::now();

        loop {
            if self.is_cancelled() {
                warn!("Cancelled waiting for condition {}", self.name);
                return Ok(false);
            }

            if self.evaluate().await? {
                debug!(
                    "Condition {} met after {:?}",
                    self.name,
                    start.elapsed()
                );
                return Ok(true);
            }

            // `>=` so a zero timeout stops after the first check even when no
            // clock time has passed.
            if start.elapsed() >= self.timeout {
                error!("Timeout waiting for condition {} to be true", self.name);
                return Ok(false);
            }

            match &self.cancel {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            warn!("Cancelled waiting for condition {}", self.name);
                            return Ok(false);
                        }
                        _ = sleep(self.interval) => {}
                    }
                }
                None => sleep(self.interval).await,
            }
        }
    }

    async fn evaluate(&mut self) -> std::result::Result<bool, E> {
        self.last_result = (self.predicate)().await?;
        Ok(self.last_result)
    }
}
