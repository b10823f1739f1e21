// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Envelope codec: the transport-neutral binary form of the per-element
//! envelope.
//!
//! `decode` fails with [`MalformedEnvelope`] when the input cannot be parsed;
//! `encode` is total for any well-formed [`Envelope`]. Round-trip law:
//! `decode(encode(e)) == e` for all valid `e`.

use prost::Message;

use crate::errors::MalformedEnvelope;
use crate::proto::Envelope;

/// Decode raw bytes into an [`Envelope`].
pub fn decode(raw: &[u8]) -> Result<Envelope, MalformedEnvelope> {
    Envelope::decode(raw).map_err(|source| MalformedEnvelope {
        len: raw.len(),
        source,
    })
}

/// Encode an [`Envelope`] to its wire form. Never fails.
pub fn encode(envelope: &Envelope) -> Vec<u8> {
    envelope.encode_to_vec()
}
