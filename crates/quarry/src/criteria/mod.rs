pub mod criterion;
pub mod group;

#[cfg(test)]
mod tests;

use crate::{error::Error, traits::EntityKind, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// re-exports
pub use criterion::{Criterion, CriterionKind};
pub use group::ConditionGroup;

///
/// Operator
///
/// The fixed comparison surface, generic over fields. Each operator carries
/// its SQL fragment and operand arity; `Like`/`NotLike` are restricted to
/// textual fields at construction time.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Operator {
    IsNull,
    IsNotNull,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
}

impl Operator {
    /// SQL fragment appended to the column name.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::IsNull => "is null",
            Self::IsNotNull => "is not null",
            Self::EqualTo => "=",
            Self::NotEqualTo => "<>",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::Like => "like",
            Self::NotLike => "not like",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Between => "between",
            Self::NotBetween => "not between",
        }
    }

    /// Operand shape the operator requires.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::IsNull | Self::IsNotNull => Arity::None,
            Self::EqualTo
            | Self::NotEqualTo
            | Self::GreaterThan
            | Self::GreaterThanOrEqualTo
            | Self::LessThan
            | Self::LessThanOrEqualTo
            | Self::Like
            | Self::NotLike => Arity::Single,
            Self::In | Self::NotIn => Arity::List,
            Self::Between | Self::NotBetween => Arity::Pair,
        }
    }

    /// True for operators restricted to textual fields.
    #[must_use]
    pub const fn textual_only(self) -> bool {
        matches!(self, Self::Like | Self::NotLike)
    }
}

///
/// Arity
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    None,
    Single,
    List,
    Pair,
}

///
/// Args
///
/// Operands supplied to the generic predicate entry point. The shape must
/// match the operator's arity; mismatches are rejected before anything is
/// appended (the typed rendering of the original null-operand checks).
///

#[derive(Clone, Debug, PartialEq)]
pub enum Args {
    None,
    One(Value),
    Many(Vec<Value>),
    Pair(Value, Value),
}

impl Args {
    pub fn one(value: impl Into<Value>) -> Self {
        Self::One(value.into())
    }

    pub fn many<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }

    pub fn pair(first: impl Into<Value>, second: impl Into<Value>) -> Self {
        Self::Pair(first.into(), second.into())
    }

    /// Operand shape for arity-mismatch diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::None => "no operands",
            Self::One(_) => "one operand",
            Self::Many(_) => "an operand list",
            Self::Pair(..) => "an operand pair",
        }
    }
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum OrderDirection {
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

///
/// Criteria
///
/// Fluent filter builder for one entity: ordered condition groups combined
/// with OR (each group ANDs its criteria), plus ordering, pagination and
/// locking directives.
///
/// Built fresh per query, mutated in place through chained calls, consumed
/// exactly once by the dispatcher. The append target is always the last
/// group; a groupless builder creates one lazily on first append. A builder
/// whose group list is empty is invalid and is rejected by every by-criteria
/// operation.
///
/// ```ignore
/// // (name = 'X') or (author in (1, 2, 3)), ordered by name
/// let mut criteria = Criteria::<Book>::equal_to("name", "X")?;
/// criteria
///     .or()
///     .and_in("author", [1_u64, 2, 3])?
///     .asc_order_by(&["name"])?;
/// ```
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(bound = "")]
pub struct Criteria<E: EntityKind> {
    groups: Vec<ConditionGroup>,
    order_by: Option<String>,
    distinct: bool,
    limit: Option<u64>,
    offset: Option<u64>,
    for_update: Option<bool>,

    #[serde(skip)]
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> Criteria<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: Vec::new(),
            order_by: None,
            distinct: false,
            limit: None,
            offset: None,
            for_update: None,
            _marker: PhantomData,
        }
    }

    //
    // Static convenience constructors
    //

    /// Start a fresh builder from a single predicate.
    pub fn of(field: &str, operator: Operator, args: Args) -> Result<Self, Error> {
        let mut criteria = Self::new();
        criteria.and(field, operator, args)?;

        Ok(criteria)
    }

    /// Start a fresh builder from an equality predicate.
    pub fn equal_to(field: &str, value: impl Into<Value>) -> Result<Self, Error> {
        Self::of(field, Operator::EqualTo, Args::one(value))
    }

    /// Start a fresh builder from a null-check predicate.
    pub fn null(field: &str) -> Result<Self, Error> {
        Self::of(field, Operator::IsNull, Args::None)
    }

    //
    // Group management
    //

    /// Close the current group and start a new one; subsequent predicates
    /// attach to the new group. On a builder with no groups yet this is a
    /// no-op, since the group the next append would lazily create is already
    /// implied.
    pub fn or(&mut self) -> &mut Self {
        if !self.groups.is_empty() {
            self.groups.push(ConditionGroup::new());
        }

        self
    }

    fn last_group(&mut self) -> &mut ConditionGroup {
        if self.groups.is_empty() {
            self.groups.push(ConditionGroup::new());
        }

        // non-empty by the guard above
        self.groups.last_mut().unwrap()
    }

    //
    // Predicates
    //

    /// Generic predicate entry point: validate the field against the entity
    /// whitelist, check operator/operand compatibility, coerce temporal
    /// operands to the column's granularity, and append one criterion to the
    /// current group. Nothing is appended on rejection.
    pub fn and(&mut self, field: &str, operator: Operator, args: Args) -> Result<&mut Self, Error> {
        let model = E::MODEL
            .field(field)
            .ok_or_else(|| Error::unrecognized_field(E::MODEL.entity_name, field))?;

        if operator.textual_only() && !model.kind.is_textual() {
            return Err(Error::invalid_argument(format!(
                "operator `{}` requires a textual field, but `{field}` is not",
                operator.sql()
            )));
        }

        let predicate = format!("{} {}", model.column, operator.sql());

        let criterion = match (operator.arity(), args) {
            (Arity::None, Args::None) => Criterion::no_value(predicate),
            (Arity::Single, Args::One(value)) => {
                Criterion::single(predicate, value.coerce_to(model.kind))
            }
            (Arity::List, Args::Many(values)) => {
                // an empty list is preserved; its SQL semantics belong to the backend
                Criterion::single(predicate, Value::List(values).coerce_to(model.kind))
            }
            (Arity::Pair, Args::Pair(first, second)) => Criterion::between(
                predicate,
                first.coerce_to(model.kind),
                second.coerce_to(model.kind),
            ),
            (arity, args) => {
                return Err(Error::invalid_argument(format!(
                    "operator `{}` on `{field}` expects {arity:?} operands, got {}",
                    operator.sql(),
                    args.shape(),
                )));
            }
        };

        self.last_group().push(criterion);

        Ok(self)
    }

    pub fn and_is_null(&mut self, field: &str) -> Result<&mut Self, Error> {
        self.and(field, Operator::IsNull, Args::None)
    }

    pub fn and_is_not_null(&mut self, field: &str) -> Result<&mut Self, Error> {
        self.and(field, Operator::IsNotNull, Args::None)
    }

    pub fn and_eq(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::EqualTo, Args::one(value))
    }

    pub fn and_ne(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::NotEqualTo, Args::one(value))
    }

    pub fn and_gt(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::GreaterThan, Args::one(value))
    }

    pub fn and_gte(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::GreaterThanOrEqualTo, Args::one(value))
    }

    pub fn and_lt(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::LessThan, Args::one(value))
    }

    pub fn and_lte(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::LessThanOrEqualTo, Args::one(value))
    }

    pub fn and_like(&mut self, field: &str, value: impl Into<Value>) -> Result<&mut Self, Error> {
        self.and(field, Operator::Like, Args::one(value))
    }

    pub fn and_not_like(
        &mut self,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.and(field, Operator::NotLike, Args::one(value))
    }

    pub fn and_in<T: Into<Value>>(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, Error> {
        self.and(field, Operator::In, Args::many(values))
    }

    pub fn and_not_in<T: Into<Value>>(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, Error> {
        self.and(field, Operator::NotIn, Args::many(values))
    }

    pub fn and_between(
        &mut self,
        field: &str,
        first: impl Into<Value>,
        second: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.and(field, Operator::Between, Args::pair(first, second))
    }

    pub fn and_not_between(
        &mut self,
        field: &str,
        first: impl Into<Value>,
        second: impl Into<Value>,
    ) -> Result<&mut Self, Error> {
        self.and(field, Operator::NotBetween, Args::pair(first, second))
    }

    //
    // Ordering
    //

    /// Append `"<column> <direction>"` clauses for the given fields,
    /// comma-joined onto any existing order clause. Alternating asc/desc
    /// calls compose a compound ordering.
    ///
    /// Fails with `InvalidArgument` on an empty field list or any field
    /// missing from the whitelist; on failure the existing clause is left
    /// untouched.
    pub fn order_by(
        &mut self,
        direction: OrderDirection,
        fields: &[&str],
    ) -> Result<&mut Self, Error> {
        if fields.is_empty() {
            return Err(Error::invalid_argument("empty order-by field list"));
        }

        // validate every field before mutating the clause
        let mut columns = Vec::with_capacity(fields.len());
        for field in fields {
            columns.push(
                E::MODEL
                    .column(field)
                    .ok_or_else(|| Error::unrecognized_field(E::MODEL.entity_name, field))?,
            );
        }

        let appended = columns
            .iter()
            .map(|column| format!("{column} {direction}"))
            .collect::<Vec<_>>()
            .join(",");

        self.order_by = Some(match self.order_by.take() {
            Some(existing) => format!("{existing},{appended}"),
            None => appended,
        });

        Ok(self)
    }

    pub fn asc_order_by(&mut self, fields: &[&str]) -> Result<&mut Self, Error> {
        self.order_by(OrderDirection::Asc, fields)
    }

    pub fn desc_order_by(&mut self, fields: &[&str]) -> Result<&mut Self, Error> {
        self.order_by(OrderDirection::Desc, fields)
    }

    //
    // Directives
    //

    pub const fn set_limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub const fn set_offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    pub const fn set_distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    /// Set true to append a `for update` clause to the query.
    pub const fn set_for_update(&mut self, for_update: bool) -> &mut Self {
        self.for_update = Some(for_update);
        self
    }

    /// Reset the builder to its freshly constructed state.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.order_by = None;
        self.distinct = false;
        self.limit = None;
        self.offset = None;
        self.for_update = None;
    }

    //
    // Inspection
    //

    #[must_use]
    pub fn groups(&self) -> &[ConditionGroup] {
        &self.groups
    }

    /// True when no group has ever been created; such a builder must never
    /// reach the dispatcher.
    #[must_use]
    pub fn groups_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn order_by_clause(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    #[must_use]
    pub const fn for_update(&self) -> Option<bool> {
        self.for_update
    }
}

impl<E: EntityKind> Default for Criteria<E> {
    fn default() -> Self {
        Self::new()
    }
}
