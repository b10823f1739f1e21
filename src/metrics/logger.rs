// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::MetricsBackendError;
use crate::metrics::{MetricKind, MetricTags, MetricsClient};

/// Default metrics backend: emits every recording as a structured log line.
///
/// Keeps running counter totals so the log line carries the accumulated value
/// rather than just the delta. Totals live behind a mutex; the client is
/// shared across worker threads.
pub struct LoggerMetricsClient {
    counters: Mutex<HashMap<String, i64>>,
}

impl LoggerMetricsClient {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Current accumulated total for a counter, if it has been recorded.
    pub fn counter_total(&self, name: &str) -> Option<i64> {
        self.counters.lock().unwrap().get(name).copied()
    }

    fn render_tags(tags: &MetricTags) -> String {
        if tags.is_empty() {
            return String::new();
        }
        serde_json::to_string(tags).unwrap_or_else(|_| String::from("{}"))
    }
}

impl Default for LoggerMetricsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsClient for LoggerMetricsClient {
    fn name(&self) -> &str {
        "logger"
    }

    fn record(
        &self,
        kind: MetricKind,
        name: &str,
        value: i64,
        tags: &MetricTags,
    ) -> Result<(), MetricsBackendError> {
        match kind {
            MetricKind::Counter => {
                let total = {
                    let mut counters = self.counters.lock().unwrap();
                    let entry = counters.entry(name.to_string()).or_insert(0);
                    *entry += value;
                    *entry
                };
                tracing::info!(
                    metric = name,
                    kind = %kind,
                    value,
                    total,
                    tags = %Self::render_tags(tags),
                    "metric recorded"
                );
            }
            MetricKind::Gauge | MetricKind::Timer => {
                tracing::info!(
                    metric = name,
                    kind = %kind,
                    value,
                    tags = %Self::render_tags(tags),
                    "metric recorded"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_totals_accumulate() {
        let client = LoggerMetricsClient::new();
        let tags = MetricTags::new();

        client
            .record(MetricKind::Counter, "dropped", 1, &tags)
            .unwrap();
        client
            .record(MetricKind::Counter, "dropped", 2, &tags)
            .unwrap();

        assert_eq!(client.counter_total("dropped"), Some(3));
        assert_eq!(client.counter_total("never_recorded"), None);
    }

    #[test]
    fn gauges_and_timers_do_not_touch_counters() {
        let client = LoggerMetricsClient::new();
        let tags = MetricTags::new();

        client
            .record(MetricKind::Gauge, "queue_depth", 7, &tags)
            .unwrap();
        client
            .record(MetricKind::Timer, "lookup_ms", 12, &tags)
            .unwrap();

        assert_eq!(client.counter_total("queue_depth"), None);
    }
}
