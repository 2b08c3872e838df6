use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// Criterion
///
/// One atomic predicate fragment: a `"<column> <operator>"` string plus its
/// operands. Immutable once constructed; the operand shape is carried by
/// `CriterionKind`, so a no-value criterion cannot smuggle operands and a
/// between criterion always holds exactly two.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Criterion {
    predicate: String,
    kind: CriterionKind,
}

///
/// CriterionKind
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum CriterionKind {
    /// Operand-free fragment ("col is null").
    NoValue,
    /// Single scalar operand.
    Single(Value),
    /// Sequence operand ("col in (...)"); may be empty, preserved as-is.
    List(Vec<Value>),
    /// Two operands, in order ("col between a and b").
    Between(Value, Value),
}

impl Criterion {
    pub(crate) const fn no_value(predicate: String) -> Self {
        Self {
            predicate,
            kind: CriterionKind::NoValue,
        }
    }

    /// Build a single-operand criterion. A sequence operand is stored as a
    /// list criterion, mirroring how generated mappers derive the kind from
    /// the supplied value.
    pub(crate) fn single(predicate: String, value: Value) -> Self {
        let kind = match value {
            Value::List(items) => CriterionKind::List(items),
            value => CriterionKind::Single(value),
        };

        Self { predicate, kind }
    }

    pub(crate) const fn between(predicate: String, first: Value, second: Value) -> Self {
        Self {
            predicate,
            kind: CriterionKind::Between(first, second),
        }
    }

    //
    // Accessors
    //

    #[must_use]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    #[must_use]
    pub const fn kind(&self) -> &CriterionKind {
        &self.kind
    }

    /// First operand, if any (single and between criteria).
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match &self.kind {
            CriterionKind::Single(v) | CriterionKind::Between(v, _) => Some(v),
            CriterionKind::NoValue | CriterionKind::List(_) => None,
        }
    }

    /// Second operand of a between criterion.
    #[must_use]
    pub const fn second_value(&self) -> Option<&Value> {
        match &self.kind {
            CriterionKind::Between(_, v) => Some(v),
            _ => None,
        }
    }

    /// Sequence operand of a list criterion.
    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        match &self.kind {
            CriterionKind::List(vs) => Some(vs),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_no_value(&self) -> bool {
        matches!(self.kind, CriterionKind::NoValue)
    }

    #[must_use]
    pub const fn is_single_value(&self) -> bool {
        matches!(self.kind, CriterionKind::Single(_))
    }

    #[must_use]
    pub const fn is_list_value(&self) -> bool {
        matches!(self.kind, CriterionKind::List(_))
    }

    #[must_use]
    pub const fn is_between_value(&self) -> bool {
        matches!(self.kind, CriterionKind::Between(..))
    }
}
