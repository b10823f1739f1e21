// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::config::JobConfig;

/// What the assembler hands the user transform: one stream of encoded
/// envelopes for single-input jobs, or a record of named streams for
/// multi-input jobs (fields named `<input-name><index>`, e.g. `events0`).
#[derive(Debug, Clone, PartialEq)]
pub enum TransformInput {
    Single(Vec<Vec<u8>>),
    Multi(BTreeMap<String, Vec<Vec<u8>>>),
}

impl TransformInput {
    /// The single stream, flattening a multi-input record into one stream in
    /// field order.
    pub fn into_elements(self) -> Vec<Vec<u8>> {
        match self {
            TransformInput::Single(elements) => elements,
            TransformInput::Multi(streams) => streams.into_values().flatten().collect(),
        }
    }

    /// A named stream of a multi-input record.
    pub fn stream(&self, name: &str) -> Option<&[Vec<u8>]> {
        match self {
            TransformInput::Single(_) => None,
            TransformInput::Multi(streams) => streams.get(name).map(|v| v.as_slice()),
        }
    }
}

/// The user's per-job processing step.
///
/// Receives the to-process stream(s) of encoded envelopes and the job config;
/// emits the result stream the assembler merges with the pass-thru branches.
/// Errors are opaque to the framework and fail the run.
#[async_trait]
pub trait StreamTransform: Send + Sync {
    async fn process(
        &self,
        input: TransformInput,
        config: &JobConfig,
    ) -> anyhow::Result<Vec<Vec<u8>>>;

    fn name(&self) -> &'static str {
        "transform"
    }
}
