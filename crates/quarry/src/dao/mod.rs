pub mod statement;
pub mod trace;


use crate::{
    criteria::Criteria,
    error::Error,
    session::{Payload, PayloadKind, Session},
    traits::EntityKind,
};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

// re-exports
pub use statement::{Opcode, StatementId};
pub use trace::{DispatchEvent, DispatchOutcome, DispatchSink};

///
/// Dao
///
/// Generic statement dispatcher for one entity: maps a logical operation to
/// a fully-qualified statement identifier and routes it to the session with
/// the payload shape that opcode demands. Validation and error semantics are
/// uniform across entities; nothing is overridden per entity.
///
/// Stateless aside from the session handle and an optional dispatch sink, so
/// a shared reference is safe for unsynchronized concurrent use. Entity DAOs
/// are thin aliases: `type BookDao<S> = Dao<Book, S>`.
///

pub struct Dao<E: EntityKind, S: Session> {
    session: S,
    sink: Option<&'static dyn DispatchSink>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind, S: Session> Dao<E, S> {
    #[must_use]
    pub const fn new(session: S) -> Self {
        Self {
            session,
            sink: None,
            _marker: PhantomData,
        }
    }

    /// Inject a dispatch sink observing every statement routed through this
    /// DAO. The sink must not affect dispatch semantics.
    #[must_use]
    pub const fn dispatch_sink(mut self, sink: &'static dyn DispatchSink) -> Self {
        self.sink = Some(sink);
        self
    }

    // ------------------------------------------------------------------
    // Inserts
    // ------------------------------------------------------------------

    /// Insert non-null fields of the record. If the entity has a generated
    /// key, the session writes it back into the record's primary-key field.
    /// Returns 1 on success.
    pub fn insert(&self, record: &mut E::Record) -> Result<u64, Error> {
        self.create_dispatch(Opcode::Insert, record)
    }

    /// Insert every field of the record. Returns 1 on success.
    pub fn insert_all(&self, record: &E::Record) -> Result<u64, Error> {
        let mut scratch = record.clone();

        self.create_dispatch(Opcode::InsertAll, &mut scratch)
    }

    /// Insert every field of the record, silently skipping on conflict.
    /// Returns 1 if inserted, 0 if the insertion was skipped.
    pub fn insert_all_ignore(&self, record: &E::Record) -> Result<u64, Error> {
        let mut scratch = record.clone();

        self.create_dispatch(Opcode::InsertAllIgnore, &mut scratch)
    }

    // ------------------------------------------------------------------
    // Selects
    // ------------------------------------------------------------------

    /// Select a record by primary key. Absence is `Ok(None)`.
    pub fn select_by_key(&self, key: &E::Key) -> Result<Option<E::Record>, Error> {
        self.fetch_one_dispatch(Opcode::SelectByKey, Payload::Key(key))
    }

    /// Select at most one record by criteria. Fails with `AmbiguousResult`
    /// if the session reports more than one matching row.
    pub fn select_one(&self, criteria: &Criteria<E>) -> Result<Option<E::Record>, Error> {
        Self::validate_criteria(criteria)?;

        self.fetch_one_dispatch(Opcode::SelectByCriteria, Payload::Criteria(criteria))
    }

    /// Select records by criteria, ordered per its order clause.
    pub fn select_list(&self, criteria: &Criteria<E>) -> Result<Vec<E::Record>, Error> {
        Self::validate_criteria(criteria)?;

        self.fetch_many_dispatch(Opcode::SelectByCriteria, Payload::Criteria(criteria))
    }

    // ------------------------------------------------------------------
    // Counts
    // ------------------------------------------------------------------

    /// Count all rows of the entity's table. This is the explicit
    /// whole-table path; it takes no criteria at all.
    pub fn count_all(&self) -> Result<u64, Error> {
        self.fetch_one_dispatch::<u64>(Opcode::Count, Payload::None)?
            .ok_or_else(|| Error::backend("count statement returned no row"))
    }

    /// Count rows matching the criteria.
    pub fn count(&self, criteria: &Criteria<E>) -> Result<u64, Error> {
        Self::validate_criteria(criteria)?;

        self.fetch_one_dispatch::<u64>(Opcode::Count, Payload::Criteria(criteria))?
            .ok_or_else(|| Error::backend("count statement returned no row"))
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Update the row matching the record's embedded key, skipping null
    /// fields. Returns the affected count (0 or 1).
    pub fn update(&self, record: &E::Record) -> Result<u64, Error> {
        self.mutate_dispatch(Opcode::Update, Payload::Record(record))
    }

    /// Update the row matching the record's embedded key, writing every
    /// field including null ones. Returns the affected count (0 or 1).
    pub fn update_all(&self, record: &E::Record) -> Result<u64, Error> {
        self.mutate_dispatch(Opcode::UpdateAll, Payload::Record(record))
    }

    /// Update non-null fields of the record onto every row matching the
    /// criteria. Returns the affected count.
    pub fn update_by_criteria(
        &self,
        record: &E::Record,
        criteria: &Criteria<E>,
    ) -> Result<u64, Error> {
        Self::validate_criteria(criteria)?;

        self.mutate_dispatch(
            Opcode::UpdateByCriteria,
            Payload::RecordAndCriteria { record, criteria },
        )
    }

    /// Update every field of the record onto every row matching the
    /// criteria. Returns the affected count.
    pub fn update_all_by_criteria(
        &self,
        record: &E::Record,
        criteria: &Criteria<E>,
    ) -> Result<u64, Error> {
        Self::validate_criteria(criteria)?;

        self.mutate_dispatch(
            Opcode::UpdateAllByCriteria,
            Payload::RecordAndCriteria { record, criteria },
        )
    }

    // ------------------------------------------------------------------
    // Deletes
    // ------------------------------------------------------------------

    /// Delete the row matching the key. Returns the affected count (0 or 1).
    pub fn delete_by_key(&self, key: &E::Key) -> Result<u64, Error> {
        self.mutate_dispatch(Opcode::DeleteByKey, Payload::Key(key))
    }

    /// Delete every row matching the criteria. Returns the affected count.
    pub fn delete_by_criteria(&self, criteria: &Criteria<E>) -> Result<u64, Error> {
        Self::validate_criteria(criteria)?;

        self.mutate_dispatch(Opcode::DeleteByCriteria, Payload::Criteria(criteria))
    }

    // ------------------------------------------------------------------
    // Dispatch plumbing
    // ------------------------------------------------------------------

    const fn statement(opcode: Opcode) -> StatementId {
        StatementId::new(E::MODEL.namespace, opcode)
    }

    /// Shared guard for every by-criteria operation: a criteria whose group
    /// list is empty was built but never populated, and routing it would
    /// mutate or scan the whole table by accident.
    fn validate_criteria(criteria: &Criteria<E>) -> Result<(), Error> {
        if criteria.groups_empty() {
            return Err(Error::invalid_argument("criteria must not be empty"));
        }

        Ok(())
    }

    fn emit(&self, event: DispatchEvent<'_>) {
        if let Some(sink) = self.sink {
            sink.on_event(event);
        }
    }

    fn fetch_one_dispatch<T: DeserializeOwned>(
        &self,
        opcode: Opcode,
        payload: Payload<'_, E>,
    ) -> Result<Option<T>, Error> {
        let statement = Self::statement(opcode);
        let kind = payload.kind();

        self.emit(DispatchEvent::Start {
            statement: &statement,
            payload: kind,
        });
        let result = self.session.fetch_one::<E, T>(&statement, payload);
        self.emit(DispatchEvent::Finish {
            statement: &statement,
            payload: kind,
            outcome: match &result {
                Ok(row) => DispatchOutcome::Row {
                    found: row.is_some(),
                },
                Err(_) => DispatchOutcome::Failed,
            },
        });

        result
    }

    fn fetch_many_dispatch(
        &self,
        opcode: Opcode,
        payload: Payload<'_, E>,
    ) -> Result<Vec<E::Record>, Error> {
        let statement = Self::statement(opcode);
        let kind = payload.kind();

        self.emit(DispatchEvent::Start {
            statement: &statement,
            payload: kind,
        });
        let result = self.session.fetch_many::<E>(&statement, payload);
        self.emit(DispatchEvent::Finish {
            statement: &statement,
            payload: kind,
            outcome: match &result {
                Ok(rows) => DispatchOutcome::Rows {
                    count: rows.len() as u64,
                },
                Err(_) => DispatchOutcome::Failed,
            },
        });

        result
    }

    fn mutate_dispatch(&self, opcode: Opcode, payload: Payload<'_, E>) -> Result<u64, Error> {
        let statement = Self::statement(opcode);
        let kind = payload.kind();

        self.emit(DispatchEvent::Start {
            statement: &statement,
            payload: kind,
        });
        let result = self.session.mutate::<E>(&statement, payload);
        self.emit(DispatchEvent::Finish {
            statement: &statement,
            payload: kind,
            outcome: match &result {
                Ok(count) => DispatchOutcome::Affected { count: *count },
                Err(_) => DispatchOutcome::Failed,
            },
        });

        result
    }

    fn create_dispatch(&self, opcode: Opcode, record: &mut E::Record) -> Result<u64, Error> {
        let statement = Self::statement(opcode);

        self.emit(DispatchEvent::Start {
            statement: &statement,
            payload: PayloadKind::Record,
        });
        let result = self.session.create::<E>(&statement, record);
        self.emit(DispatchEvent::Finish {
            statement: &statement,
            payload: PayloadKind::Record,
            outcome: match &result {
                Ok(count) => DispatchOutcome::Affected { count: *count },
                Err(_) => DispatchOutcome::Failed,
            },
        });

        result
    }
}

impl<E: EntityKind, S: Session + Clone> Clone for Dao<E, S> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            sink: self.sink,
            _marker: PhantomData,
        }
    }
}
