// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// A metrics backend client failed to record a value.
///
/// Contained within the metrics registry: the failure is logged and the
/// remaining clients still receive the call. Metrics never crash the data
/// path.
#[derive(Error, Debug)]
#[error("Metrics backend '{client}' failed to record '{metric}': {reason}")]
pub struct MetricsBackendError {
    pub client: String,
    pub metric: String,
    pub reason: String,
}
