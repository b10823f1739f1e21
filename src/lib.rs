// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod assembler;      // pipeline assembly + direct runner
pub mod codec;          // envelope wire codec
pub mod config;         // job config + validation
pub mod context;        // set-once run context
pub mod errors;         // error handling
pub mod lookup;         // existence lookup backends
pub mod metrics;        // metrics fan-out registry
pub mod observability;
pub mod proto;          // envelope message types live here
pub mod router;         // pure routing decisions
pub mod stages;         // labeled filter stages
pub mod traits;         // unified abstractions
