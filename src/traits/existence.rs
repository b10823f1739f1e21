// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Direction;

/// Capability interface for stages that perform existence checks.
///
/// A stage implementing this declares its [`Direction`] and therefore which
/// half of the job's data-location configuration it reads. Implementors are
/// validated at construction time (contract version, non-empty location)
/// rather than misbehaving at run time.
pub trait ExistenceCheckable {
    fn direction(&self) -> Direction;

    /// Data location prefix checks resolve against.
    fn location(&self) -> &str;

    /// Suffix appended to the element identifier.
    fn file_suffix(&self) -> &str;

    /// Absolute key path for an element: `location + element + suffix`.
    fn absolute_path(&self, element: &str) -> String {
        format!(
            "{}/{}{}",
            self.location().trim_end_matches('/'),
            element,
            self.file_suffix()
        )
    }
}
