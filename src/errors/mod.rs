// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod metrics;
mod stage;

pub use config::ConfigurationError;
pub use metrics::MetricsBackendError;
pub use stage::{LookupError, MalformedEnvelope, StageError};
