// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-element stage events.

use std::fmt::{Display, Formatter};

use crate::config::Direction;
use crate::router::ExistenceState;

/// An element was dropped because its raw bytes could not be decoded as an
/// envelope.
///
/// # Log Level
/// `error!` - The element is lost, but the job continues
///
/// # Example
/// ```
/// use streamwright::observability::messages::stage::EnvelopeDecodeFailed;
///
/// let err = streamwright::codec::decode(&[0xff]).unwrap_err();
/// let msg = EnvelopeDecodeFailed {
///     label: "Ping Filter",
///     error: &err,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct EnvelopeDecodeFailed<'a> {
    pub label: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EnvelopeDecodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropping element - stage '{}' could not decode it as an envelope: {}",
            self.label, self.error
        )
    }
}

/// Result of an existence check, mirroring the check's direction and outcome.
///
/// # Log Level
/// `info!` - Routine routing decision
pub struct ExistenceChecked<'a> {
    pub direction: Direction,
    pub state: ExistenceState,
    pub path: &'a str,
}

impl Display for ExistenceChecked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {} at {}", self.direction.title(), self.state, self.path)
    }
}

/// An element was dropped because its input data does not exist.
///
/// # Log Level
/// `info!` - Expected outcome for missing input data
pub struct ElementDropped<'a> {
    pub label: &'a str,
    pub element: &'a [u8],
}

impl Display for ElementDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: dropping element '{}' - nothing to process",
            self.label,
            String::from_utf8_lossy(self.element)
        )
    }
}
