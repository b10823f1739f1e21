// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Marker-driven filters: ping, force, and the explicit drop stage.
//!
//! These are thin stage shells around the pure routing decisions in
//! [`crate::router`]; they own the wrapping contract (decode on entry,
//! re-encode on exit) and the logging/metrics side effects.

use std::sync::Arc;

use crate::codec;
use crate::context::RunContext;
use crate::errors::ConfigurationError;
use crate::observability::messages::stage::ElementDropped;
use crate::router::{self, ExistenceState, Route};
use crate::stages::{decode_or_drop, ensure_contract_version};

/// Splits elements into pass-thru (ping) and to-process (everything else).
/// Applied before any existence check.
pub struct PingFilter {
    label: String,
    context: Arc<RunContext>,
}

impl PingFilter {
    pub fn new(
        label: impl Into<String>,
        context: Arc<RunContext>,
    ) -> Result<Self, ConfigurationError> {
        ensure_contract_version("ping-filter", &context)?;
        Ok(Self {
            label: label.into(),
            context,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Route one element. `None` means the element was dropped at the decode
    /// boundary (already logged).
    pub fn apply(&self, raw: &[u8]) -> Option<(Route, Vec<u8>)> {
        let envelope = decode_or_drop(&self.label, raw, &self.context)?;
        let route = router::route_ping(&envelope);
        match route {
            Route::PassThru => self.context.metrics().inc("ping-pass-thru"),
            _ => self.context.metrics().inc("ping-to-process"),
        }
        Some((route, codec::encode(&envelope)))
    }
}

/// Re-splits elements whose output was FOUND: forced elements rejoin the
/// to-process branch, the rest pass thru untouched.
pub struct ForceFilter {
    label: String,
    context: Arc<RunContext>,
}

impl ForceFilter {
    pub fn new(
        label: impl Into<String>,
        context: Arc<RunContext>,
    ) -> Result<Self, ConfigurationError> {
        ensure_contract_version("force-filter", &context)?;
        Ok(Self {
            label: label.into(),
            context,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn apply(&self, raw: &[u8]) -> Option<(Route, Vec<u8>)> {
        let envelope = decode_or_drop(&self.label, raw, &self.context)?;
        let route = router::route_output_state(ExistenceState::Found, envelope.is_force());
        if route == Route::Process {
            self.context.metrics().inc("force-reprocess");
        }
        Some((route, codec::encode(&envelope)))
    }
}

/// Terminal stage for elements with nothing to process: logs and counts the
/// drop so it is visible in logs/metrics, never silent.
pub struct DropStage {
    label: String,
    context: Arc<RunContext>,
}

impl DropStage {
    pub fn new(
        label: impl Into<String>,
        context: Arc<RunContext>,
    ) -> Result<Self, ConfigurationError> {
        ensure_contract_version("drop", &context)?;
        Ok(Self {
            label: label.into(),
            context,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn apply(&self, raw: &[u8]) {
        let element = codec::decode(raw)
            .map(|envelope| envelope.element().to_vec())
            .unwrap_or_default();
        tracing::info!("{}", ElementDropped {
            label: &self.label,
            element: &element,
        });
        self.context.metrics().inc("element-drop-not-found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::Envelope;
    use crate::stages::test_support;

    #[test]
    fn ping_filter_routes_ping_to_pass_thru() {
        let filter = PingFilter::new("Ping Filter", test_support::context()).unwrap();
        let raw = codec::encode(&Envelope::for_element("a").with_ping(true));

        let (route, bytes) = filter.apply(&raw).unwrap();
        assert_eq!(route, Route::PassThru);
        assert!(codec::decode(&bytes).unwrap().is_ping());
    }

    #[test]
    fn ping_filter_routes_normal_elements_to_process() {
        let filter = PingFilter::new("Ping Filter", test_support::context()).unwrap();
        let raw = codec::encode(&Envelope::for_element("a"));

        let (route, _) = filter.apply(&raw).unwrap();
        assert_eq!(route, Route::Process);
    }

    #[test]
    fn ping_filter_drops_malformed_elements() {
        let filter = PingFilter::new("Ping Filter", test_support::context()).unwrap();
        assert!(filter.apply(&[0xff, 0xff]).is_none());
    }

    #[test]
    fn force_filter_reprocesses_forced_elements() {
        let filter = ForceFilter::new("Output Force Filter", test_support::context()).unwrap();

        let forced = codec::encode(&Envelope::for_element("a").with_force(true));
        let (route, _) = filter.apply(&forced).unwrap();
        assert_eq!(route, Route::Process);

        let unforced = codec::encode(&Envelope::for_element("a"));
        let (route, _) = filter.apply(&unforced).unwrap();
        assert_eq!(route, Route::PassThru);
    }

    #[test]
    fn drop_stage_swallows_even_malformed_bytes() {
        let drop = DropStage::new("Drop Not Found Data", test_support::context()).unwrap();
        drop.apply(&codec::encode(&Envelope::for_element("gone")));
        drop.apply(&[0xff]);
    }
}
