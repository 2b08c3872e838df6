//! Dispatch tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect dispatch
//! semantics.

use crate::{dao::StatementId, session::PayloadKind};

///
/// DispatchSink
///

pub trait DispatchSink: Send + Sync {
    fn on_event(&self, event: DispatchEvent<'_>);
}

///
/// DispatchOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// fetch-one completed; true when a row was found.
    Row { found: bool },
    /// fetch-many completed with this row count.
    Rows { count: u64 },
    /// mutate/create completed with this affected-row count.
    Affected { count: u64 },
    /// The session call failed; the error is already on its way to the caller.
    Failed,
}

///
/// DispatchEvent
///

#[derive(Clone, Copy, Debug)]
pub enum DispatchEvent<'a> {
    Start {
        statement: &'a StatementId,
        payload: PayloadKind,
    },
    Finish {
        statement: &'a StatementId,
        payload: PayloadKind,
        outcome: DispatchOutcome,
    },
}
