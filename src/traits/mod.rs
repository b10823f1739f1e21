// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod existence;
mod transform;

pub use existence::ExistenceCheckable;
pub use transform::{StreamTransform, TransformInput};
