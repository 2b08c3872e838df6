//! Quarry: a typed criteria builder and generic statement dispatcher for
//! data-access layers in the generated-mapper style.
//!
//! Callers assemble a [`criteria::Criteria`] through fluent, whitelist-checked
//! predicate calls — never string concatenation — and hand it to a
//! [`dao::Dao`], which maps the logical operation onto a fully-qualified
//! statement identifier and routes it, with the payload that opcode demands,
//! to a [`session::Session`] collaborator. SQL compilation, pooling and
//! transactions all live behind that trait.
#![warn(unreachable_pub)]

mod macros;

// public exports are one module level down
pub mod criteria;
pub mod dao;
pub mod error;
pub mod model;
pub mod session;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary only; no sessions, sinks, or helpers.
///

pub mod prelude {
    pub use crate::{
        criteria::{Args, Criteria, Operator, OrderDirection},
        dao::Dao,
        error::Error,
        model::{EntityModel, FieldKind, FieldModel},
        traits::EntityKind,
        value::Value,
    };
}
