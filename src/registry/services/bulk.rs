//! Aggregate response envelope for bulk save and delete operations.

use crate::registry::domain::ObjectKey;
use crate::registry::ports::{ItemOutcome, ItemRejection};

/// One rejected item of a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    key: ObjectKey,
    rejection: ItemRejection,
}

impl BulkFailure {
    /// Pairs the key of a submitted item with the rejection it drew.
    #[must_use]
    pub const fn new(key: ObjectKey, rejection: ItemRejection) -> Self {
        Self { key, rejection }
    }

    /// Returns the key of the rejected item.
    #[must_use]
    pub const fn key(&self) -> ObjectKey {
        self.key
    }

    /// Returns the rejection.
    #[must_use]
    pub const fn rejection(&self) -> &ItemRejection {
        &self.rejection
    }
}

/// Aggregate result of a bulk save or delete.
///
/// Every input item lands in exactly one of the two lists: its key among
/// the successes, or a [`BulkFailure`] among the failures. A
/// provider-internal error never produces a partial response; the whole
/// call fails instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkResponse {
    successes: Vec<ObjectKey>,
    failures: Vec<BulkFailure>,
}

impl BulkResponse {
    /// Creates an empty response.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Returns the keys of the items processed successfully, in input
    /// order.
    #[must_use]
    pub fn successes(&self) -> &[ObjectKey] {
        &self.successes
    }

    /// Returns the per-item failures, in input order.
    #[must_use]
    pub fn failures(&self) -> &[BulkFailure] {
        &self.failures
    }

    /// Returns whether every item was processed successfully.
    #[must_use]
    pub const fn is_fully_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the total number of processed items, successes and
    /// failures combined.
    #[must_use]
    pub const fn processed_len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Folds the outcome of one item into the response.
    pub(crate) fn record(&mut self, item_key: ObjectKey, outcome: ItemOutcome) {
        match outcome {
            Ok(key) => self.successes.push(key),
            Err(rejection) => self.failures.push(BulkFailure::new(item_key, rejection)),
        }
    }
}
