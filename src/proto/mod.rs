// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

// Wire message definitions for the envelope contract
pub mod envelope_v1;

// Re-export the types for easier access
pub use envelope_v1::{AuditLogItem, Envelope, EnvelopeData, EnvelopeMetadata, Recipient, Version};

impl Envelope {
    /// Build a V2 envelope around an element identifier.
    pub fn for_element(element: impl Into<Vec<u8>>) -> Self {
        Envelope {
            version: Version::V2 as i32,
            data: Some(EnvelopeData {
                element: element.into(),
                payload: Vec::new(),
            }),
            metadata: Some(EnvelopeMetadata::default()),
        }
    }

    /// The element identifier, or an empty slice when unset.
    pub fn element(&self) -> &[u8] {
        self.data.as_ref().map(|d| d.element.as_slice()).unwrap_or(&[])
    }

    /// The materialized payload, or an empty slice when unset.
    pub fn payload(&self) -> &[u8] {
        self.data.as_ref().map(|d| d.payload.as_slice()).unwrap_or(&[])
    }

    pub fn is_ping(&self) -> bool {
        self.metadata.as_ref().map(|m| m.ping).unwrap_or(false)
    }

    pub fn is_force(&self) -> bool {
        self.metadata.as_ref().map(|m| m.force).unwrap_or(false)
    }

    /// Copy of this envelope with the ping marker set. Envelopes are
    /// immutable; mutation always produces a new value.
    pub fn with_ping(&self, ping: bool) -> Self {
        let mut next = self.clone();
        next.metadata.get_or_insert_with(EnvelopeMetadata::default).ping = ping;
        next
    }

    /// Copy of this envelope with the force marker set.
    pub fn with_force(&self, force: bool) -> Self {
        let mut next = self.clone();
        next.metadata.get_or_insert_with(EnvelopeMetadata::default).force = force;
        next
    }

    /// Copy of this envelope with a replaced payload.
    pub fn with_payload(&self, payload: impl Into<Vec<u8>>) -> Self {
        let mut next = self.clone();
        next.data.get_or_insert_with(EnvelopeData::default).payload = payload.into();
        next
    }
}
