//! Fixture entities and a canned-response session double shared by the
//! builder and dispatcher tests.

use crate::{
    dao::{Opcode, StatementId},
    entity_model,
    error::Error,
    session::{Payload, PayloadKind, Session},
    traits::EntityKind,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::{cell::RefCell, collections::VecDeque};

///
/// Book
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Book {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub author: Option<u64>,
}

entity_model! {
    entity Book {
        name: "Book",
        namespace: "demo.book",
        key: "id" => u64,
        fields: [
            "id" => "id": Uint,
            "name" => "name": Text,
            "author" => "author": Uint,
        ],
    }
}

///
/// Author
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Author {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub created: Option<NaiveDateTime>,
}

entity_model! {
    entity Author {
        name: "Author",
        namespace: "demo.author",
        key: "id" => u64,
        fields: [
            "id" => "id": Uint,
            "name" => "name": Text,
            "birthday" => "birthday": Date,
            "created" => "created": DateTime,
        ],
    }
}

///
/// DispatchedCall
/// One journal entry: the qualified statement plus the payload shape.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchedCall {
    pub statement: String,
    pub payload: PayloadKind,
}

enum OneReply {
    Absent,
    Row(JsonValue),
    Ambiguous { matched: u64 },
}

///
/// MemorySession
///
/// Session double backed by canned JSON rows. Replies are consumed in FIFO
/// order; every call is journaled so tests can assert what reached the
/// session (and, for rejected arguments, that nothing did).
///

#[derive(Default)]
pub struct MemorySession {
    calls: RefCell<Vec<DispatchedCall>>,
    one: RefCell<VecDeque<OneReply>>,
    many: RefCell<VecDeque<Vec<JsonValue>>>,
    affected: RefCell<VecDeque<u64>>,
    generated_key: RefCell<Option<JsonValue>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // Canned replies (consumed FIFO)
    //

    #[must_use]
    pub fn reply_row(self, row: JsonValue) -> Self {
        self.one.borrow_mut().push_back(OneReply::Row(row));
        self
    }

    #[must_use]
    pub fn reply_absent(self) -> Self {
        self.one.borrow_mut().push_back(OneReply::Absent);
        self
    }

    #[must_use]
    pub fn reply_ambiguous(self, matched: u64) -> Self {
        self.one
            .borrow_mut()
            .push_back(OneReply::Ambiguous { matched });
        self
    }

    #[must_use]
    pub fn reply_rows(self, rows: Vec<JsonValue>) -> Self {
        self.many.borrow_mut().push_back(rows);
        self
    }

    #[must_use]
    pub fn reply_affected(self, count: u64) -> Self {
        self.affected.borrow_mut().push_back(count);
        self
    }

    #[must_use]
    pub fn reply_generated_key(self, key: JsonValue) -> Self {
        *self.generated_key.borrow_mut() = Some(key);
        self
    }

    //
    // Journal
    //

    #[must_use]
    pub fn calls(&self) -> Vec<DispatchedCall> {
        self.calls.borrow().clone()
    }

    fn record_call(&self, statement: &StatementId, payload: PayloadKind) {
        self.calls.borrow_mut().push(DispatchedCall {
            statement: statement.to_string(),
            payload,
        });
    }
}

impl Session for MemorySession {
    fn fetch_one<E: EntityKind, T: serde::de::DeserializeOwned>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<Option<T>, Error> {
        self.record_call(statement, payload.kind());

        match self.one.borrow_mut().pop_front() {
            None | Some(OneReply::Absent) => Ok(None),
            Some(OneReply::Row(row)) => serde_json::from_value(row)
                .map(Some)
                .map_err(Error::backend),
            Some(OneReply::Ambiguous { matched }) => {
                Err(Error::ambiguous(statement.to_string(), matched))
            }
        }
    }

    fn fetch_many<E: EntityKind>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<Vec<E::Record>, Error> {
        self.record_call(statement, payload.kind());

        let rows = self.many.borrow_mut().pop_front().unwrap_or_default();

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Error::backend))
            .collect()
    }

    fn mutate<E: EntityKind>(
        &self,
        statement: &StatementId,
        payload: Payload<'_, E>,
    ) -> Result<u64, Error> {
        self.record_call(statement, payload.kind());

        Ok(self.affected.borrow_mut().pop_front().unwrap_or(1))
    }

    fn create<E: EntityKind>(
        &self,
        statement: &StatementId,
        record: &mut E::Record,
    ) -> Result<u64, Error> {
        self.record_call(statement, PayloadKind::Record);

        // key write-back is the sparse-insert contract only
        if statement.opcode() == Opcode::Insert {
            if let Some(key) = self.generated_key.borrow_mut().take() {
                let mut row = serde_json::to_value(&*record).map_err(Error::backend)?;
                row[E::MODEL.primary_key] = key;
                *record = serde_json::from_value(row).map_err(Error::backend)?;
            }
        }

        Ok(self.affected.borrow_mut().pop_front().unwrap_or(1))
    }
}
