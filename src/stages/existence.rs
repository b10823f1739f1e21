// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Direction-aware existence-check stage.
//!
//! Per element: `RECEIVED -> DECODED -> CHECKED -> TAGGED`, or `DROPPED` on
//! decode failure. Lookup failures are not swallowed; they bubble to the
//! caller, where the host execution engine's retry policy applies.

use std::sync::Arc;

use crate::config::{Direction, SinkConfig, SourceConfig};
use crate::context::RunContext;
use crate::errors::{ConfigurationError, LookupError};
use crate::lookup::ExistenceLookup;
use crate::observability::messages::stage::ExistenceChecked;
use crate::router::{ExistenceState, TaggedOutput};
use crate::stages::{decode_or_drop, ensure_contract_version};
use crate::traits::ExistenceCheckable;
use crate::codec;

/// Terminal outcome for one element entering the stage.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// Tagged with its existence state and re-encoded.
    Tagged(TaggedOutput),
    /// Dropped at the decode boundary; already logged and counted.
    Dropped,
}

/// Stateful stage that tags each element `FOUND` or `NOT_FOUND` against the
/// data location for its direction.
pub struct ExistenceCheckStage {
    label: String,
    direction: Direction,
    location: String,
    file_suffix: String,
    context: Arc<RunContext>,
    lookup: Arc<dyn ExistenceLookup>,
}

impl std::fmt::Debug for ExistenceCheckStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistenceCheckStage")
            .field("label", &self.label)
            .field("direction", &self.direction)
            .field("location", &self.location)
            .field("file_suffix", &self.file_suffix)
            .finish_non_exhaustive()
    }
}

impl ExistenceCheckStage {
    /// Stage checking the input-side data location of a source.
    pub fn for_input(
        label: impl Into<String>,
        source: &SourceConfig,
        context: Arc<RunContext>,
        lookup: Arc<dyn ExistenceLookup>,
    ) -> Result<Self, ConfigurationError> {
        Self::build(
            label.into(),
            Direction::Input,
            source.name.clone(),
            source.location.clone(),
            source.file_suffix.clone(),
            context,
            lookup,
        )
    }

    /// Stage checking the output-side data location of the sink.
    pub fn for_output(
        label: impl Into<String>,
        sink: &SinkConfig,
        context: Arc<RunContext>,
        lookup: Arc<dyn ExistenceLookup>,
    ) -> Result<Self, ConfigurationError> {
        Self::build(
            label.into(),
            Direction::Output,
            sink.name.clone(),
            sink.location.clone(),
            sink.file_suffix.clone(),
            context,
            lookup,
        )
    }

    fn build(
        label: String,
        direction: Direction,
        name: String,
        location: String,
        file_suffix: String,
        context: Arc<RunContext>,
        lookup: Arc<dyn ExistenceLookup>,
    ) -> Result<Self, ConfigurationError> {
        ensure_contract_version("existence-check", &context)?;
        if location.is_empty() {
            return Err(ConfigurationError::MissingDataLocation { direction, name });
        }
        Ok(Self {
            label,
            direction,
            location,
            file_suffix,
            context,
            lookup,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run one element through the stage.
    pub async fn check(&self, raw: &[u8]) -> Result<CheckOutcome, LookupError> {
        let Some(envelope) = decode_or_drop(&self.label, raw, &self.context) else {
            return Ok(CheckOutcome::Dropped);
        };

        let Ok(element) = std::str::from_utf8(envelope.element()) else {
            tracing::error!(
                stage = %self.label,
                "Dropping element - identifier is not valid UTF-8"
            );
            self.context.metrics().inc("envelope-decode-drop");
            return Ok(CheckOutcome::Dropped);
        };

        let path = self.absolute_path(element);
        let exists = self.lookup.exists(&path).await?;
        let state = if exists {
            ExistenceState::Found
        } else {
            ExistenceState::NotFound
        };

        tracing::info!("{}", ExistenceChecked {
            direction: self.direction,
            state,
            path: &path,
        });

        Ok(CheckOutcome::Tagged(TaggedOutput {
            state,
            encoded: codec::encode(&envelope),
        }))
    }
}

impl ExistenceCheckable for ExistenceCheckStage {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn file_suffix(&self) -> &str {
        &self.file_suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MemoryLookup;
    use crate::proto::Envelope;
    use crate::stages::test_support;

    fn stage_with_lookup(lookup: Arc<MemoryLookup>) -> ExistenceCheckStage {
        let context = test_support::context();
        let source = context.config().inputs[0].clone();
        ExistenceCheckStage::for_input("Input Exists Filter", &source, context, lookup).unwrap()
    }

    #[tokio::test]
    async fn tags_found_when_path_exists() {
        let lookup = Arc::new(MemoryLookup::new());
        lookup.insert("gs://bucket/in/track-1.ogg");
        let stage = stage_with_lookup(lookup);

        let raw = codec::encode(&Envelope::for_element("track-1"));
        let outcome = stage.check(&raw).await.unwrap();

        match outcome {
            CheckOutcome::Tagged(tagged) => {
                assert_eq!(tagged.state, ExistenceState::Found);
                let decoded = codec::decode(&tagged.encoded).unwrap();
                assert_eq!(decoded.element(), b"track-1");
            }
            CheckOutcome::Dropped => panic!("expected a tagged element"),
        }
    }

    #[tokio::test]
    async fn tags_not_found_when_path_missing() {
        let stage = stage_with_lookup(Arc::new(MemoryLookup::new()));
        let raw = codec::encode(&Envelope::for_element("track-2"));

        match stage.check(&raw).await.unwrap() {
            CheckOutcome::Tagged(tagged) => assert_eq!(tagged.state, ExistenceState::NotFound),
            CheckOutcome::Dropped => panic!("expected a tagged element"),
        }
    }

    #[tokio::test]
    async fn malformed_bytes_are_dropped_not_errored() {
        let stage = stage_with_lookup(Arc::new(MemoryLookup::new()));
        let outcome = stage.check(&[0xff, 0xfe, 0xfd]).await.unwrap();
        assert_eq!(outcome, CheckOutcome::Dropped);
    }

    #[tokio::test]
    async fn lookup_errors_bubble_to_caller() {
        struct BrokenLookup;

        #[async_trait::async_trait]
        impl ExistenceLookup for BrokenLookup {
            async fn exists(&self, path: &str) -> Result<bool, LookupError> {
                Err(LookupError::new(path, "connection reset"))
            }
        }

        let context = test_support::context();
        let source = context.config().inputs[0].clone();
        let stage = ExistenceCheckStage::for_input(
            "Input Exists Filter",
            &source,
            context,
            Arc::new(BrokenLookup),
        )
        .unwrap();

        let raw = codec::encode(&Envelope::for_element("track-3"));
        let err = stage.check(&raw).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn output_stage_reads_sink_config() {
        let context = test_support::context();
        let sink = context.config().output().clone();
        let stage = ExistenceCheckStage::for_output(
            "Output Exists Filter",
            &sink,
            context,
            Arc::new(MemoryLookup::new()),
        )
        .unwrap();

        assert_eq!(stage.direction(), Direction::Output);
        assert_eq!(stage.absolute_path("t"), "gs://bucket/out/t.wav");
    }

    #[test]
    fn missing_location_fails_construction() {
        let context = test_support::context();
        let mut source = context.config().inputs[0].clone();
        source.location = String::new();

        let err = ExistenceCheckStage::for_input(
            "Input Exists Filter",
            &source,
            context,
            Arc::new(MemoryLookup::new()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingDataLocation {
                direction: Direction::Input,
                ..
            }
        ));
    }
}
