// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-element processing stages and the wrapping contract they share.
//!
//! Every stage decodes the envelope on entry and re-encodes on exit; an
//! element that fails to decode is dropped and logged, and no error escapes
//! the stage. Stage constructors validate the envelope contract version so a
//! mismatch fails at build time, not per element.

mod existence;
mod filters;

pub use existence::{CheckOutcome, ExistenceCheckStage};
pub use filters::{DropStage, ForceFilter, PingFilter};

use crate::codec;
use crate::config::consts::ENVELOPE_CONTRACT_VERSION;
use crate::context::RunContext;
use crate::errors::ConfigurationError;
use crate::observability::messages::stage::EnvelopeDecodeFailed;
use crate::proto::Envelope;

/// Decode-on-entry wrapper shared by all stages: either a decoded envelope or
/// a contained drop (logged and counted, never propagated).
pub(crate) fn decode_or_drop(label: &str, raw: &[u8], context: &RunContext) -> Option<Envelope> {
    match codec::decode(raw) {
        Ok(envelope) => Some(envelope),
        Err(error) => {
            tracing::error!("{}", EnvelopeDecodeFailed {
                label,
                error: &error,
            });
            context.metrics().inc("envelope-decode-drop");
            None
        }
    }
}

/// Constructor-time contract validation for stages.
pub(crate) fn ensure_contract_version(
    stage: &'static str,
    context: &RunContext,
) -> Result<(), ConfigurationError> {
    let version = context.config().version;
    if version != ENVELOPE_CONTRACT_VERSION {
        return Err(ConfigurationError::UnsupportedContractVersion {
            stage,
            version,
            expected: ENVELOPE_CONTRACT_VERSION,
        });
    }
    Ok(())
}
