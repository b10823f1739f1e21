// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod metrics;
pub mod pipeline;
pub mod stage;
