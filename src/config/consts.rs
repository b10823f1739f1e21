// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Envelope contract version this core understands. Jobs declaring any other
/// version are rejected at build time.
pub const ENVELOPE_CONTRACT_VERSION: u32 = 2;

/// Name of the metrics backend installed when a job configures none.
pub const DEFAULT_METRICS_BACKEND: &str = "logger";
