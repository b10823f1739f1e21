// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-job run context: configuration, logging, and metrics access handed to
//! every stage.
//!
//! The context is an explicit value constructed once per job and passed by
//! `Arc` into every stage constructor. A process-global slot exists for hosts
//! that need ambient access, but it can be initialized at most once;
//! re-initialization is a configuration error.

use std::sync::{Arc, OnceLock};

use crate::config::JobConfig;
use crate::errors::ConfigurationError;
use crate::metrics::MetricsRegistry;

static GLOBAL: OnceLock<Arc<RunContext>> = OnceLock::new();

/// Shared per-job handle to the read-only [`JobConfig`] and the lazily-built
/// [`MetricsRegistry`].
pub struct RunContext {
    config: JobConfig,
    metrics: OnceLock<Arc<MetricsRegistry>>,
}

impl RunContext {
    pub fn new(config: JobConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            metrics: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// The job's metrics registry, built from config on first access and
    /// shared by all stages thereafter.
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        self.metrics
            .get_or_init(|| Arc::new(MetricsRegistry::from_config(&self.config.metrics)))
            .clone()
    }

    /// Install a context as the process-global one. Fails if a global context
    /// was already installed; the slot is set once per process.
    pub fn try_init_global(context: Arc<RunContext>) -> Result<(), ConfigurationError> {
        GLOBAL
            .set(context)
            .map_err(|_| ConfigurationError::ContextAlreadyInitialized)
    }

    /// The process-global context, if one was installed.
    pub fn global() -> Option<Arc<RunContext>> {
        GLOBAL.get().cloned()
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("job_name", &self.config.job_name)
            .field("metrics_initialized", &self.metrics.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JobConfig {
        serde_yaml::from_str(
            r#"
job_name: ctx-test
inputs:
  - name: events
    location: gs://bucket/in
outputs:
  - name: events
    location: gs://bucket/out
"#,
        )
        .unwrap()
    }

    #[test]
    fn metrics_registry_is_built_once() {
        let ctx = RunContext::new(config());
        let first = ctx.metrics();
        let second = ctx.metrics();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn global_slot_is_set_once() {
        // first install may race with other tests in the same process; only
        // the second install's failure is the invariant under test
        let _ = RunContext::try_init_global(RunContext::new(config()));
        let err = RunContext::try_init_global(RunContext::new(config())).unwrap_err();
        assert!(matches!(err, ConfigurationError::ContextAlreadyInitialized));
        assert!(RunContext::global().is_some());
    }
}
