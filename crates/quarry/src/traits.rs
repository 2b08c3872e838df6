use crate::model::EntityModel;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

///
/// EntityKind
///
/// Contract between one persisted entity and the generic dispatcher.
///
/// The associated model carries everything entity-specific the dispatcher
/// needs: the statement namespace and the field whitelist. Entity DAOs are
/// plain `Dao<E, S>` values; nothing is overridden per entity.
///

pub trait EntityKind {
    /// Primary-key type, passed as the payload of by-key statements.
    type Key: Debug + Serialize;

    /// Record type, passed as the payload of insert/update statements.
    type Record: Clone + Debug + Serialize + DeserializeOwned;

    /// Static runtime model (namespace + field whitelist).
    const MODEL: &'static EntityModel;

    /// Statement-id namespace for this entity.
    #[must_use]
    fn namespace() -> &'static str {
        Self::MODEL.namespace
    }
}
