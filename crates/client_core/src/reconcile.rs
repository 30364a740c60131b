//! Merge-by-identity for sibling collections ordered by an explicit index.
//!
//! None of these functions await; callers holding the store mutate it in one
//! synchronous step.

use shared::domain::{Group, GroupId, TestMatrix, TestMatrixId, TestTarget, TestTargetId};

pub trait Reconcilable {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
    fn display_index(&self) -> i64;
}

impl Reconcilable for TestMatrix {
    type Id = TestMatrixId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn display_index(&self) -> i64 {
        self.index
    }
}

impl Reconcilable for Group {
    type Id = GroupId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn display_index(&self) -> i64 {
        self.index
    }
}

impl Reconcilable for TestTarget {
    type Id = TestTargetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn display_index(&self) -> i64 {
        self.index
    }
}

/// Merges `incoming` into `existing`.
///
/// Entries of `existing` not named by the batch are kept as they are, entries
/// sharing an identity are replaced by the incoming value and unknown
/// identities are inserted. The result is stably sorted by display index.
/// When the batch names an identity twice the later entry wins.
pub fn merge_by_identity<T: Reconcilable>(existing: &mut Vec<T>, incoming: Vec<T>) {
    let mut batch: Vec<T> = Vec::with_capacity(incoming.len());
    for entity in incoming {
        match batch.iter().position(|seen| seen.id() == entity.id()) {
            Some(position) => batch[position] = entity,
            None => batch.push(entity),
        }
    }

    existing.retain(|current| !batch.iter().any(|entity| entity.id() == current.id()));
    existing.extend(batch);
    existing.sort_by_key(Reconcilable::display_index);
}

/// Drops the entry with `id`, if any. Returns whether something was removed.
pub fn delete_by_identity<T: Reconcilable>(existing: &mut Vec<T>, id: &T::Id) -> bool {
    let before = existing.len();
    existing.retain(|current| current.id() != id);
    existing.len() != before
}

pub fn find_by_identity_mut<'a, T: Reconcilable>(
    existing: &'a mut [T],
    id: &T::Id,
) -> Option<&'a mut T> {
    existing.iter_mut().find(|current| current.id() == id)
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
