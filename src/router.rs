// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pure per-element branch routing.
//!
//! Every decision here is a function of the element and immutable
//! configuration only. There is no shared mutable state, which is what allows
//! the host execution engine to invoke stages concurrently across worker
//! threads without locks in the hot path. The assembler composes these
//! decisions into the merge topology; this module only answers "which branch
//! does this element continue on".

use std::fmt;

use crate::proto::Envelope;

/// Outcome of an existence lookup for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistenceState {
    Found,
    NotFound,
}

impl fmt::Display for ExistenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExistenceState::Found => write!(f, "found"),
            ExistenceState::NotFound => write!(f, "not found"),
        }
    }
}

/// Which branch an element continues on after a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Continue toward the user transform.
    Process,
    /// Bypass processing and rejoin the stream at the final merge.
    PassThru,
    /// Leave the pipeline entirely (logged, never silent).
    Drop,
}

/// An element tagged with its existence state, as emitted by an
/// existence-check stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedOutput {
    pub state: ExistenceState,
    pub encoded: Vec<u8>,
}

/// Ping filter: decided first, before any existence check. Ping elements are
/// inspect-and-forward; they never reach the transform.
pub fn route_ping(envelope: &Envelope) -> Route {
    if envelope.is_ping() {
        Route::PassThru
    } else {
        Route::Process
    }
}

/// Output-existence routing: work whose output already exists is skipped
/// unless the element is marked force.
pub fn route_output_state(state: ExistenceState, force: bool) -> Route {
    match state {
        ExistenceState::NotFound => Route::Process,
        ExistenceState::Found if force => Route::Process,
        ExistenceState::Found => Route::PassThru,
    }
}

/// Input-existence routing: an element whose input is missing has nothing to
/// process and is dropped.
pub fn route_input_state(state: ExistenceState) -> Route {
    match state {
        ExistenceState::Found => Route::Process,
        ExistenceState::NotFound => Route::Drop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_elements_always_pass_thru() {
        let env = Envelope::for_element("a").with_ping(true);
        assert_eq!(route_ping(&env), Route::PassThru);

        // ping wins even when force is also set
        let env = env.with_force(true);
        assert_eq!(route_ping(&env), Route::PassThru);
    }

    #[test]
    fn non_ping_elements_process() {
        let env = Envelope::for_element("a");
        assert_eq!(route_ping(&env), Route::Process);
    }

    #[test]
    fn existing_output_passes_thru_unless_forced() {
        assert_eq!(
            route_output_state(ExistenceState::Found, false),
            Route::PassThru
        );
        assert_eq!(
            route_output_state(ExistenceState::Found, true),
            Route::Process
        );
        assert_eq!(
            route_output_state(ExistenceState::NotFound, false),
            Route::Process
        );
        assert_eq!(
            route_output_state(ExistenceState::NotFound, true),
            Route::Process
        );
    }

    #[test]
    fn missing_input_drops() {
        assert_eq!(route_input_state(ExistenceState::NotFound), Route::Drop);
        assert_eq!(route_input_state(ExistenceState::Found), Route::Process);
    }
}
