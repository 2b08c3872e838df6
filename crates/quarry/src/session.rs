use crate::{criteria::Criteria, dao::StatementId, error::Error, traits::EntityKind};
use serde::de::DeserializeOwned;

///
/// Payload
///
/// Parameter payload routed to the session alongside a statement identifier.
/// The shape is determined solely by the opcode: bare key, bare record, the
/// criteria, or the record/criteria pair used by update-by-criteria.
///

#[derive(Debug)]
pub enum Payload<'a, E: EntityKind> {
    None,
    Key(&'a E::Key),
    Record(&'a E::Record),
    Criteria(&'a Criteria<E>),
    RecordAndCriteria {
        record: &'a E::Record,
        criteria: &'a Criteria<E>,
    },
}

impl<E: EntityKind> Payload<'_, E> {
    /// Shape discriminant, used by dispatch sinks and test doubles.
    #[must_use]
    pub const fn kind(&self) -> PayloadKind {
        match self {
            Self::None => PayloadKind::None,
            Self::Key(_) => PayloadKind::Key,
            Self::Record(_) => PayloadKind::Record,
            Self::Criteria(_) => PayloadKind::Criteria,
            Self::RecordAndCriteria { .. } => PayloadKind::RecordAndCriteria,
        }
    }
}

///
/// PayloadKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayloadKind {
    None,
    Key,
    Record,
    Criteria,
    RecordAndCriteria,
}

///
/// Session
///
/// The persistence collaborator behind the dispatcher: four operations keyed
/// by `(statement identifier, payload)`. Everything stateful — connections,
/// statement execution, transactions, blocking — lives behind this trait.
///
/// Implementations signal "select one matched many" through
/// `Error::AmbiguousResult`; every other failure they raise is wrapped in
/// `Error::Backend` and propagates through the dispatcher untouched.
///

pub trait Session {
    /// Execute a statement expected to yield at most one row.
    ///
    /// `T` is the materialized row type: the entity record for selects, a
    /// scalar for count statements. Absence is `Ok(None)`, never an error.
    fn fetch_one<E: EntityKind, T: DeserializeOwned>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<Option<T>, Error>;

    /// Execute a statement yielding any number of rows, ordered per the
    /// criteria's order clause.
    fn fetch_many<E: EntityKind>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<Vec<E::Record>, Error>;

    /// Execute a mutating statement (update/delete), returning the affected
    /// row count.
    fn mutate<E: EntityKind>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<u64, Error>;

    /// Execute an insert statement, returning the affected row count.
    ///
    /// The record is mutable so a sparse insert (`Opcode::Insert`) can write
    /// a generated key back into its primary-key field; the full and
    /// insert-or-ignore opcodes leave it untouched.
    fn create<E: EntityKind>(
        &self,
        statement: &StatementId,
        record: &mut E::Record,
    ) -> Result<u64, Error>;
}

impl<T: Session + ?Sized> Session for &T {
    fn fetch_one<E: EntityKind, U: DeserializeOwned>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<Option<U>, Error> {
        (**self).fetch_one::<E, U>(statement, payload)
    }

    fn fetch_many<E: EntityKind>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<Vec<E::Record>, Error> {
        (**self).fetch_many::<E>(statement, payload)
    }

    fn mutate<E: EntityKind>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<u64, Error> {
        (**self).mutate::<E>(statement, payload)
    }

    fn create<E: EntityKind>(
        &self,
        statement: &StatementId,
        record: &mut E::Record,
    ) -> Result<u64, Error> {
        (**self).create::<E>(statement, record)
    }
}
