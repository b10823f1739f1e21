// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Metrics fan-out registry.
//!
//! One `record` call is relayed to every configured backend client in
//! registration order. A failing client is logged and skipped; the remaining
//! clients still receive the call. Metrics never crash the data path.

mod logger;

pub use logger::LoggerMetricsClient;

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::consts::DEFAULT_METRICS_BACKEND;
use crate::config::MetricsConfig;
use crate::errors::MetricsBackendError;
use crate::observability::messages::metrics::{MetricsClientFailed, UnknownMetricsBackend};

/// What kind of measurement a recording represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Timer,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Counter => write!(f, "counter"),
            MetricKind::Gauge => write!(f, "gauge"),
            MetricKind::Timer => write!(f, "timer"),
        }
    }
}

/// Free-form dimension tags attached to a recording.
pub type MetricTags = HashMap<String, String>;

/// One metrics backend.
///
/// Construction is backend-specific (each entry in the job config carries its
/// own options sub-object); recording must be cheap and thread-safe.
pub trait MetricsClient: Send + Sync {
    fn name(&self) -> &str;

    fn record(
        &self,
        kind: MetricKind,
        name: &str,
        value: i64,
        tags: &MetricTags,
    ) -> Result<(), MetricsBackendError>;
}

/// Fan-out dispatcher over the configured backend clients.
///
/// Built once per job from configuration; the client list is read-only after
/// construction, which makes the registry safe to share across worker
/// threads. If no backend is configured (including an explicitly empty list),
/// the default logging backend is installed so metrics are never silently
/// lost.
pub struct MetricsRegistry {
    clients: Vec<Arc<dyn MetricsClient>>,
}

impl MetricsRegistry {
    pub fn from_config(cfg: &MetricsConfig) -> Self {
        let mut clients: Vec<Arc<dyn MetricsClient>> = Vec::new();
        for backend in &cfg.backends {
            match backend.name.as_str() {
                DEFAULT_METRICS_BACKEND => {
                    clients.push(Arc::new(LoggerMetricsClient::new()));
                }
                other => {
                    tracing::warn!("{}", UnknownMetricsBackend { name: other });
                }
            }
        }

        if clients.is_empty() {
            clients.push(Arc::new(LoggerMetricsClient::new()));
        }

        Self { clients }
    }

    /// Registry over an explicit client list. Used by hosts that construct
    /// backend clients themselves.
    pub fn with_clients(clients: Vec<Arc<dyn MetricsClient>>) -> Self {
        if clients.is_empty() {
            return Self::from_config(&MetricsConfig::default());
        }
        Self { clients }
    }

    pub fn client_names(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.name()).collect()
    }

    /// Relay one recording to every client in registration order.
    pub fn record(&self, kind: MetricKind, name: &str, value: i64, tags: &MetricTags) {
        for client in &self.clients {
            if let Err(error) = client.record(kind, name, value, tags) {
                tracing::warn!("{}", MetricsClientFailed { error: &error });
            }
        }
    }

    /// Increment a counter by one with no tags.
    pub fn inc(&self, name: &str) {
        self.record(MetricKind::Counter, name, 1, &MetricTags::new());
    }

    pub fn counter(&self, name: &str, value: i64, tags: &MetricTags) {
        self.record(MetricKind::Counter, name, value, tags);
    }

    pub fn gauge(&self, name: &str, value: i64, tags: &MetricTags) {
        self.record(MetricKind::Gauge, name, value, tags);
    }

    pub fn timer(&self, name: &str, millis: i64, tags: &MetricTags) {
        self.record(MetricKind::Timer, name, millis, tags);
    }
}

impl fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("clients", &self.client_names())
            .finish()
    }
}

thread_local! {
    static THREAD_REGISTRY: OnceCell<Arc<MetricsRegistry>> = const { OnceCell::new() };
}

/// Per-worker-thread registry, created lazily on first access and cached for
/// the life of the thread. Lets workers keep thread-local counters without
/// contending on a shared registry.
pub fn thread_registry(cfg: &MetricsConfig) -> Arc<MetricsRegistry> {
    THREAD_REGISTRY.with(|cell| {
        cell.get_or_init(|| Arc::new(MetricsRegistry::from_config(cfg)))
            .clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: AtomicUsize,
    }

    impl MetricsClient for CountingClient {
        fn name(&self) -> &str {
            "counting"
        }

        fn record(
            &self,
            _kind: MetricKind,
            _name: &str,
            _value: i64,
            _tags: &MetricTags,
        ) -> Result<(), MetricsBackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingClient;

    impl MetricsClient for FailingClient {
        fn name(&self) -> &str {
            "failing"
        }

        fn record(
            &self,
            _kind: MetricKind,
            name: &str,
            _value: i64,
            _tags: &MetricTags,
        ) -> Result<(), MetricsBackendError> {
            Err(MetricsBackendError {
                client: "failing".to_string(),
                metric: name.to_string(),
                reason: "backend unavailable".to_string(),
            })
        }
    }

    #[test]
    fn empty_config_installs_default_logger_backend() {
        let registry = MetricsRegistry::from_config(&MetricsConfig::default());
        assert_eq!(registry.client_names(), vec!["logger"]);
    }

    #[test]
    fn unknown_backend_is_skipped_but_metrics_still_flow() {
        let cfg: MetricsConfig = serde_yaml::from_str(
            r#"
backends:
  - name: warehouse-9000
"#,
        )
        .unwrap();
        let registry = MetricsRegistry::from_config(&cfg);
        // fell back to the default so nothing is lost
        assert_eq!(registry.client_names(), vec!["logger"]);
    }

    #[test]
    fn failing_client_does_not_block_remaining_clients() {
        let counting = Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
        });
        let registry = MetricsRegistry::with_clients(vec![
            Arc::new(FailingClient),
            counting.clone() as Arc<dyn MetricsClient>,
        ]);

        registry.inc("elements_processed");
        registry.counter("elements_processed", 5, &MetricTags::new());

        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn thread_registry_is_cached_per_thread() {
        let cfg = MetricsConfig::default();
        let first = thread_registry(&cfg);
        let second = thread_registry(&cfg);
        assert!(Arc::ptr_eq(&first, &second));

        let cfg_clone = cfg.clone();
        let other = std::thread::spawn(move || thread_registry(&cfg_clone))
            .join()
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
