use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Opcode
///
/// Fixed logical operation names. Each maps to one statement suffix; the
/// dispatcher joins it with the entity namespace to form the fully-qualified
/// statement identifier the session executes.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Opcode {
    /// Sparse insert: null fields skipped, generated key written back.
    Insert,
    /// Full insert: every field, null or not.
    InsertAll,
    /// Full insert that silently skips on conflict.
    InsertAllIgnore,
    SelectByKey,
    SelectByCriteria,
    Count,
    /// Sparse update by embedded key.
    Update,
    /// Full update by embedded key.
    UpdateAll,
    /// Sparse update of all rows matching the criteria.
    UpdateByCriteria,
    /// Full update of all rows matching the criteria.
    UpdateAllByCriteria,
    DeleteByKey,
    DeleteByCriteria,
}

impl Opcode {
    /// Statement suffix, stable across entities.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::InsertAll => "insertAll",
            Self::InsertAllIgnore => "insertAllIgnore",
            Self::SelectByKey => "selectByPk",
            Self::SelectByCriteria => "selectByCriteria",
            Self::Count => "count",
            Self::Update => "update",
            Self::UpdateAll => "updateAll",
            Self::UpdateByCriteria => "updateByCriteria",
            Self::UpdateAllByCriteria => "updateAllByCriteria",
            Self::DeleteByKey => "deleteByPk",
            Self::DeleteByCriteria => "deleteByCriteria",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// StatementId
///
/// Fully-qualified statement identifier: entity namespace + opcode.
/// Displays as `"<namespace>.<opcode>"`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StatementId {
    namespace: &'static str,
    opcode: Opcode,
}

impl StatementId {
    #[must_use]
    pub const fn new(namespace: &'static str, opcode: Opcode) -> Self {
        Self { namespace, opcode }
    }

    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        self.namespace
    }

    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Qualified identifier as an owned string.
    #[must_use]
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.opcode)
    }
}
