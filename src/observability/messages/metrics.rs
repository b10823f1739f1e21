// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for metrics registry events.

use std::fmt::{Display, Formatter};

use crate::errors::MetricsBackendError;

/// A backend client failed to record a metric; the call still reached the
/// remaining clients.
///
/// # Log Level
/// `warn!` - Degraded observability, data path unaffected
pub struct MetricsClientFailed<'a> {
    pub error: &'a MetricsBackendError,
}

impl Display for MetricsClientFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Ignoring metrics backend failure: {}", self.error)
    }
}

/// A configured metrics backend name has no known client implementation.
///
/// # Log Level
/// `warn!` - Configuration issue worth surfacing, not fatal
pub struct UnknownMetricsBackend<'a> {
    pub name: &'a str,
}

impl Display for UnknownMetricsBackend<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unknown metrics backend '{}' configured; skipping it",
            self.name
        )
    }
}
