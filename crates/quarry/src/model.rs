///
/// FieldModel
/// Runtime field metadata: the exposed name, the physical column, the kind.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in predicates and ordering directives.
    pub name: &'static str,
    /// Physical column name emitted into predicate fragments.
    pub column: &'static str,
    /// Runtime type shape, consulted for operator and coercion rules.
    pub kind: FieldKind,
}

///
/// FieldKind
///
/// Minimal type surface needed by predicate validation. `Date` and
/// `DateTime` drive temporal coercion; `Text` gates the like operators.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Uint,
    Float,
    Text,
    Date,
    DateTime,
}

impl FieldKind {
    /// True for fields that accept `like` / `not like`.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Text)
    }

    /// True for fields subject to temporal coercion.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

///
/// EntityModel
///
/// Static, per-entity runtime model: the statement-id namespace plus the
/// field-to-column whitelist. Fixed at entity-definition time, one constant
/// per entity (see `entity_model!`).
///

#[derive(Debug)]
pub struct EntityModel {
    /// Stable entity name, used in diagnostics.
    pub entity_name: &'static str,
    /// Namespace prefix for fully-qualified statement identifiers.
    pub namespace: &'static str,
    /// Name of the primary-key field (write-back target for sparse inserts).
    pub primary_key: &'static str,
    /// Ordered field whitelist (authoritative for predicates and ordering).
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    /// Whitelist lookup by exposed field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Physical column for an exposed field name, if whitelisted.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&'static str> {
        self.field(name).map(|f| f.column)
    }
}
