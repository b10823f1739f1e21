// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-element errors raised inside processing stages.

use thiserror::Error;

/// Raw bytes could not be parsed as an envelope.
///
/// Contained at the element boundary: the stage drops the element and logs
/// this error; it never propagates further, since one malformed element must
/// not abort a job processing millions of them.
#[derive(Error, Debug)]
#[error("Cannot decode {len} bytes as an envelope: {source}")]
pub struct MalformedEnvelope {
    /// Length of the rejected input, for log context.
    pub len: usize,
    #[source]
    pub source: prost::DecodeError,
}

/// The backing store could not answer an existence check.
///
/// Propagated to the caller; whether to retry or fail the element is the host
/// execution engine's policy, not this layer's.
#[derive(Error, Debug)]
#[error("Existence lookup for '{path}' failed: {reason}")]
pub struct LookupError {
    pub path: String,
    pub reason: String,
}

impl LookupError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Failures surfacing from a running pipeline.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The user transform returned an error. Opaque to the framework.
    #[error("User transform failed: {0}")]
    Transform(#[source] anyhow::Error),
}
