// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging message types.
//!
//! All diagnostic log lines emitted by the routing core are defined here as
//! structs with `Display` impls, rather than as format strings scattered
//! through the codebase. Messages are organized by subsystem:
//!
//! * `messages::stage` - per-element stage events (decode drops, existence
//!   check results, explicit drops)
//! * `messages::pipeline` - pipeline assembly and merge events
//! * `messages::metrics` - metrics registry fan-out events

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install the process-wide log subscriber: fmt output filtered by
/// `RUST_LOG`. Safe to call more than once; only the first call installs.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
