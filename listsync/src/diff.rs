use alloc::vec;
use alloc::vec::Vec;

use crate::identity::{DuplicateIdentity, SnapshotSide, first_positions};
use crate::key::IdentityKey;

/// A row removed from the old snapshot, addressed in the old indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deletion<K> {
    pub index: usize,
    pub id: K,
}

/// A row added by the new snapshot, addressed in the new indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insertion<K> {
    pub index: usize,
    pub id: K,
}

/// A retained row relocated from `from` (old indexing) to `to` (new indexing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

/// The operations that turn one snapshot into the next.
///
/// Indexes follow batch-update conventions: `deletions` and `Move::from` refer to the old
/// snapshot, `insertions`, `Move::to` and `reloads` refer to the new one. `deletions` and
/// `insertions` are strictly ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditScript<K> {
    pub deletions: Vec<Deletion<K>>,
    pub insertions: Vec<Insertion<K>>,
    pub moves: Vec<Move>,
    /// New indexes of rows present in both snapshots (candidates for an in-place refresh).
    pub reloads: Vec<usize>,
    /// Repeated identities found in either snapshot.
    pub duplicates: Vec<DuplicateIdentity>,
}

impl<K> Default for EditScript<K> {
    fn default() -> Self {
        Self {
            deletions: Vec::new(),
            insertions: Vec::new(),
            moves: Vec::new(),
            reloads: Vec::new(),
            duplicates: Vec::new(),
        }
    }
}

impl<K> EditScript<K> {
    /// Returns `true` when there is nothing structural to animate.
    ///
    /// `reloads` are refresh hints and do not count.
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.insertions.is_empty() && self.moves.is_empty()
    }

    pub fn deletion_indexes(&self) -> Vec<usize> {
        self.deletions.iter().map(|d| d.index).collect()
    }

    pub fn insertion_indexes(&self) -> Vec<usize> {
        self.insertions.iter().map(|i| i.index).collect()
    }

    /// The row count a list surface must report after the batch: `old - deletions + insertions`.
    ///
    /// Returns `None` when the script deletes more rows than `old_len` holds.
    pub fn expected_len(&self, old_len: usize) -> Option<usize> {
        old_len
            .checked_sub(self.deletions.len())?
            .checked_add(self.insertions.len())
    }

    /// Replays the script against `old` the way a batch update would.
    ///
    /// Deleted rows and move sources leave their old slots; insertions and move destinations
    /// take their new slots; every other row keeps its relative order and fills the gaps.
    /// Returns `None` when the script does not fit `old`.
    pub fn apply(&self, old: &[K]) -> Option<Vec<K>>
    where
        K: Clone,
    {
        let len = self.expected_len(old.len())?;

        let mut leaving = vec![false; old.len()];
        for d in &self.deletions {
            *leaving.get_mut(d.index)? = true;
        }
        for m in &self.moves {
            *leaving.get_mut(m.from)? = true;
        }

        let mut out: Vec<Option<K>> = vec![None; len];
        for ins in &self.insertions {
            let slot = out.get_mut(ins.index)?;
            if slot.is_some() {
                return None;
            }
            *slot = Some(ins.id.clone());
        }
        for m in &self.moves {
            let slot = out.get_mut(m.to)?;
            if slot.is_some() {
                return None;
            }
            *slot = Some(old[m.from].clone());
        }

        let mut staying = old
            .iter()
            .zip(&leaving)
            .filter(|(_, leaving)| !**leaving)
            .map(|(id, _)| id);
        for slot in out.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(staying.next()?.clone());
        }
        if staying.next().is_some() {
            return None;
        }

        out.into_iter().collect()
    }
}

/// Diffs two snapshots of identities.
pub fn diff<K: IdentityKey + Clone>(old: &[K], new: &[K]) -> EditScript<K> {
    diff_by_key(old, new, K::clone)
}

/// Diffs two snapshots, deriving each row's identity with `key`.
///
/// Rows are correlated by identity only. When a snapshot repeats an identity the first
/// occurrence wins: later repeats in `old` are deleted and later repeats in `new` are
/// inserted, so the script always satisfies the batch count check.
pub fn diff_by_key<T, K: IdentityKey + Clone>(
    old: &[T],
    new: &[T],
    mut key: impl FnMut(&T) -> K,
) -> EditScript<K> {
    let mut duplicates = Vec::new();
    let (old_first, old_is_first) =
        first_positions(old, SnapshotSide::Old, &mut key, &mut duplicates);
    let (new_first, new_is_first) =
        first_positions(new, SnapshotSide::New, &mut key, &mut duplicates);

    let mut deletions = Vec::new();
    // (old index, new index) of every retained row, in old order.
    let mut retained = Vec::new();
    for (index, item) in old.iter().enumerate() {
        let id = key(item);
        match new_first.get(&id) {
            Some(&to) if old_is_first[index] => retained.push((index, to)),
            _ => deletions.push(Deletion { index, id }),
        }
    }

    let mut insertions = Vec::new();
    let mut reloads = Vec::new();
    let mut inserted = vec![false; new.len()];
    for (index, item) in new.iter().enumerate() {
        let id = key(item);
        if new_is_first[index] && old_first.contains_key(&id) {
            reloads.push(index);
        } else {
            inserted[index] = true;
            insertions.push(Insertion { index, id });
        }
    }

    // Working order: old order without deletions, insertions placed at their new indexes.
    // Inserting in ascending order never shifts an earlier insertion, so retained rows simply
    // occupy the non-inserted slots in old order.
    let mut working_slots = inserted
        .iter()
        .enumerate()
        .filter(|(_, inserted)| !**inserted)
        .map(|(slot, _)| slot);
    let mut moves = Vec::new();
    for &(from, to) in &retained {
        let working = working_slots.next();
        if from != to || working != Some(to) {
            moves.push(Move { from, to });
        }
    }

    ltrace!(
        old_len = old.len(),
        new_len = new.len(),
        deletions = deletions.len(),
        insertions = insertions.len(),
        moves = moves.len(),
        "diff"
    );

    EditScript {
        deletions,
        insertions,
        moves,
        reloads,
        duplicates,
    }
}
