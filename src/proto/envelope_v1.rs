// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wire messages for the versioned per-element envelope.
//!
//! These structs are the binary contract shared with every producer and
//! consumer surrounding a job. Field numbers are frozen; add fields, never
//! renumber.

/// One unit of work flowing through a pipeline.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Envelope {
    /// Envelope schema version. Stages validate this against the job's
    /// declared contract version at construction time.
    #[prost(enumeration = "Version", tag = "1")]
    pub version: i32,
    #[prost(message, optional, tag = "2")]
    pub data: ::core::option::Option<EnvelopeData>,
    #[prost(message, optional, tag = "3")]
    pub metadata: ::core::option::Option<EnvelopeMetadata>,
}

/// The element identifier plus its (optional) materialized payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnvelopeData {
    /// Referential identifier for the unit of work (e.g. a storage key stem).
    #[prost(bytes = "vec", tag = "1")]
    pub element: ::prost::alloc::vec::Vec<u8>,
    /// Raw payload bytes, opaque to the routing core.
    #[prost(bytes = "vec", tag = "2")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
}

/// Per-element routing metadata: force/ping overrides, recipients, and the
/// audit trail. Opaque to user transforms.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnvelopeMetadata {
    /// Inspect-and-forward marker: the element bypasses processing entirely.
    #[prost(bool, tag = "1")]
    pub ping: bool,
    /// Reprocess even when the output already exists.
    #[prost(bool, tag = "2")]
    pub force: bool,
    #[prost(message, repeated, tag = "3")]
    pub recipients: ::prost::alloc::vec::Vec<Recipient>,
    #[prost(message, repeated, tag = "4")]
    pub audit_log: ::prost::alloc::vec::Vec<AuditLogItem>,
}

/// A downstream job that should receive this element.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Recipient {
    #[prost(string, tag = "1")]
    pub job_name: ::prost::alloc::string::String,
}

/// One hop in the element's audit trail.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuditLogItem {
    #[prost(int64, tag = "1")]
    pub timestamp_ms: i64,
    #[prost(string, tag = "2")]
    pub job_name: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Version {
    Unknown = 0,
    V1 = 1,
    V2 = 2,
}

impl Version {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Version::Unknown => "UNKNOWN",
            Version::V1 => "V1",
            Version::V2 => "V2",
        }
    }
}
