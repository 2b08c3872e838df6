use crate::criteria::criterion::Criterion;
use serde::{Deserialize, Serialize};

///
/// ConditionGroup
///
/// Ordered criteria combined with logical AND. Append-only during
/// construction; a group is valid once it holds at least one criterion.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ConditionGroup {
    criteria: Vec<Criterion>,
}

impl ConditionGroup {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    /// A group contributes to the filter iff it is non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.criteria.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }
}
