//! Weighted round-robin rotation.
//!
//! A [`Rotation`] owns a circular sequence of [`WeightedEntry`] records and a
//! single cursor. Every public method takes the one internal mutex for its
//! whole body, so each call is atomic with respect to every other call,
//! and a batch drawn with [`Rotation::next_batch`] is a contiguous run of
//! the rotation.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::circular::{CircularList, Handle};
use crate::entry::{DEFAULT_WEIGHT, WeightedEntry};
use crate::error::{RotationError, RotationResult};

/// Where the cursor stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Rotation not started, or explicitly reset. The next selection
    /// returns the first entry.
    Unset,
    /// The next selection returns this entry without consuming its weight.
    /// Entered when the current entry is removed.
    Pending(Handle),
    /// This entry was the last one returned.
    At(Handle),
}

impl Cursor {
    fn points_at(self, handle: Handle) -> bool {
        matches!(self, Cursor::At(h) | Cursor::Pending(h) if h == handle)
    }
}

struct RotationState<T> {
    entries: CircularList<WeightedEntry<T>>,
    cursor: Cursor,
}

impl<T: PartialEq> RotationState<T> {
    fn find(&self, value: &T) -> Option<Handle> {
        self.entries.find(|entry| entry.value() == value)
    }

    /// Apply `f` to every entry holding `value`; returns the match count.
    ///
    /// Matches are collected before anything is touched, so a panicking
    /// `PartialEq` leaves every weight as it was.
    fn for_each_match<F>(&mut self, value: &T, mut f: F) -> usize
    where
        F: FnMut(&mut WeightedEntry<T>),
    {
        let matches: Vec<Handle> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.value() == value)
            .map(|(handle, _)| handle)
            .collect();
        for handle in &matches {
            if let Some(entry) = self.entries.get_mut(*handle) {
                f(entry);
            }
        }
        matches.len()
    }
}

impl<T: Clone> RotationState<T> {
    /// One step of the selection algorithm.
    fn select(&mut self) -> RotationResult<T> {
        if self.entries.is_empty() {
            return Err(RotationError::Empty);
        }

        let selected = match self.cursor {
            Cursor::Unset => self.entries.first().ok_or(RotationError::Empty)?,
            Cursor::Pending(handle) => handle,
            Cursor::At(handle) => {
                let entry = self.entries.get_mut(handle).ok_or(RotationError::Empty)?;
                if entry.must_advance() {
                    entry.reset_usage();
                    self.entries
                        .next_or_first(handle)
                        .ok_or(RotationError::Empty)?
                } else {
                    handle
                }
            }
        };

        self.cursor = Cursor::At(selected);
        let entry = self.entries.get(selected).ok_or(RotationError::Empty)?;
        trace!(weight = entry.weight(), usage = entry.usage(), "selected entry");
        Ok(entry.value().clone())
    }
}

/// Upper bound on the up-front reservation for a batch; larger batches
/// grow as they fill.
const BATCH_PREALLOC_LIMIT: usize = 4096;

/// Point-in-time view of one entry, in rotation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot<T> {
    pub value: T,
    pub weight: u32,
    pub usage: u64,
    /// The cursor rests on this entry.
    pub current: bool,
    /// The next selection returns this entry without consuming weight.
    pub pending: bool,
}

/// Thread-safe weighted round-robin selector.
///
/// An entry of weight `w` is returned `w + 1` times in a row before the
/// rotation moves on to its successor.
pub struct Rotation<T> {
    state: Mutex<RotationState<T>>,
}

impl<T> Rotation<T> {
    /// Create a rotation over `values`, every entry at [`DEFAULT_WEIGHT`].
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let entries = values
            .into_iter()
            .map(|value| WeightedEntry::new(value, DEFAULT_WEIGHT))
            .collect();
        Self::from_entries(entries)
    }

    /// Create a rotation with no entries.
    pub fn empty() -> Self {
        Self::from_entries(CircularList::new())
    }

    /// Create a rotation pairing each value with the weight at the same
    /// position.
    ///
    /// Fails with `InvalidArgument` if the two sequences differ in length.
    pub fn with_weights<I, W>(values: I, weights: W) -> RotationResult<Self>
    where
        I: IntoIterator<Item = T>,
        W: IntoIterator<Item = u32>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let weights: Vec<u32> = weights.into_iter().collect();
        if values.len() != weights.len() {
            return Err(RotationError::InvalidArgument(format!(
                "{} weights given for {} values",
                weights.len(),
                values.len()
            )));
        }

        let entries = values
            .into_iter()
            .zip(weights)
            .map(|(value, weight)| WeightedEntry::new(value, weight))
            .collect();
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: CircularList<WeightedEntry<T>>) -> Self {
        debug!(len = entries.len(), "rotation created");
        Self {
            state: Mutex::new(RotationState {
                entries,
                cursor: Cursor::Unset,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RotationState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of entries currently in the rotation.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Unset the cursor so the next selection starts from the first entry.
    ///
    /// With `reset_counters`, every usage counter also returns to zero.
    /// Weights are untouched.
    pub fn reset(&self, reset_counters: bool) {
        let mut state = self.lock();
        state.cursor = Cursor::Unset;
        if reset_counters {
            for entry in state.entries.values_mut() {
                entry.reset_usage();
            }
        }
        debug!(reset_counters, "rotation reset");
    }

    /// Set every entry's weight to `weight`.
    pub fn reset_all_weights(&self, weight: u32) {
        let mut state = self.lock();
        for entry in state.entries.values_mut() {
            entry.set_weight(weight);
        }
        debug!(weight, len = state.entries.len(), "reset all weights");
    }

    /// Insert at the head of the rotation. The cursor does not move.
    pub fn add_first(&self, value: T, weight: u32) {
        let mut state = self.lock();
        state.entries.push_front(WeightedEntry::new(value, weight));
        debug!(weight, len = state.entries.len(), "added entry at head");
    }

    /// Insert at the tail of the rotation. The cursor does not move.
    pub fn add_last(&self, value: T, weight: u32) {
        let mut state = self.lock();
        state.entries.push_back(WeightedEntry::new(value, weight));
        debug!(weight, len = state.entries.len(), "added entry at tail");
    }
}

impl<T: PartialEq> Rotation<T> {
    /// Insert immediately before the first entry equal to `anchor`.
    pub fn add_before(&self, anchor: &T, value: T, weight: u32) -> RotationResult<()> {
        let mut state = self.lock();
        let handle = state
            .find(anchor)
            .ok_or_else(|| RotationError::NotFound("anchor value is not in the rotation".into()))?;
        state
            .entries
            .insert_before(handle, WeightedEntry::new(value, weight));
        debug!(weight, len = state.entries.len(), "added entry before anchor");
        Ok(())
    }

    /// Insert immediately after the first entry equal to `anchor`.
    pub fn add_after(&self, anchor: &T, value: T, weight: u32) -> RotationResult<()> {
        let mut state = self.lock();
        let handle = state
            .find(anchor)
            .ok_or_else(|| RotationError::NotFound("anchor value is not in the rotation".into()))?;
        state
            .entries
            .insert_after(handle, WeightedEntry::new(value, weight));
        debug!(weight, len = state.entries.len(), "added entry after anchor");
        Ok(())
    }

    /// Remove the first entry equal to `value`.
    ///
    /// Returns `Ok(false)` if nothing matches. Refuses to remove the last
    /// remaining entry. If the removed entry holds the cursor, the cursor
    /// moves to its successor, which the next selection then returns.
    pub fn remove(&self, value: &T) -> RotationResult<bool> {
        let mut state = self.lock();
        let Some(handle) = state.find(value) else {
            return Ok(false);
        };

        if state.entries.len() == 1 {
            warn!("refusing to remove the last entry of a rotation");
            return Err(RotationError::InvalidOperation(
                "cannot remove the last remaining entry".into(),
            ));
        }

        if state.cursor.points_at(handle) {
            if let Some(successor) = state.entries.next_or_first(handle) {
                if let Some(entry) = state.entries.get_mut(successor) {
                    entry.reset_usage();
                }
                state.cursor = Cursor::Pending(successor);
                debug!("cursor relocated to successor of removed entry");
            }
        }

        state.entries.remove(handle);
        debug!(len = state.entries.len(), "removed entry");
        Ok(true)
    }

    /// Place the cursor on the first entry equal to `value`, as if that
    /// entry had just been selected. The target keeps its usage counter;
    /// the entry the cursor leaves starts its next visit from zero.
    ///
    /// On `NotFound` the cursor is left where it was.
    pub fn reset_to(&self, value: &T) -> RotationResult<()> {
        let mut state = self.lock();
        let handle = state
            .find(value)
            .ok_or_else(|| RotationError::NotFound("target value is not in the rotation".into()))?;
        if let Cursor::At(previous) = state.cursor {
            if previous != handle {
                if let Some(entry) = state.entries.get_mut(previous) {
                    entry.reset_usage();
                }
            }
        }
        state.cursor = Cursor::At(handle);
        debug!("cursor reset to entry");
        Ok(())
    }

    /// Set the weight of every entry equal to `item`. Returns how many
    /// entries matched.
    pub fn reset_weight(&self, item: &T, weight: u32) -> usize {
        let mut state = self.lock();
        let matched = state.for_each_match(item, |entry| entry.set_weight(weight));
        debug!(weight, matched, "reset weight");
        matched
    }

    /// Add `amount` to the weight of every entry equal to `item`.
    ///
    /// `amount` must be at least 1.
    pub fn increase_weight(&self, item: &T, amount: u32) -> RotationResult<usize> {
        check_amount(amount)?;
        let mut state = self.lock();
        let matched = state.for_each_match(item, |entry| entry.increase_weight(amount));
        debug!(amount, matched, "increased weight");
        Ok(matched)
    }

    /// Subtract `amount` from the weight of every entry equal to `item`,
    /// stopping at zero.
    ///
    /// `amount` must be at least 1.
    pub fn decrease_weight(&self, item: &T, amount: u32) -> RotationResult<usize> {
        check_amount(amount)?;
        let mut state = self.lock();
        let matched = state.for_each_match(item, |entry| entry.decrease_weight(amount));
        debug!(amount, matched, "decreased weight");
        Ok(matched)
    }

    /// Whether any entry equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.lock().find(value).is_some()
    }

    /// Weight of the first entry equal to `value`.
    pub fn weight_of(&self, value: &T) -> Option<u32> {
        let state = self.lock();
        let handle = state.find(value)?;
        state.entries.get(handle).map(WeightedEntry::weight)
    }
}

impl<T: Clone> Rotation<T> {
    /// Select the next value.
    ///
    /// The first call after construction or [`reset`](Self::reset) returns
    /// the first entry. After that, the current entry repeats until its
    /// weight is spent, then the rotation advances, wrapping at the end.
    pub fn next(&self) -> RotationResult<T> {
        self.lock().select()
    }

    /// Select `count` values as one uninterrupted run of the rotation.
    pub fn next_batch(&self, count: usize) -> RotationResult<Vec<T>> {
        if count == 0 {
            return Err(RotationError::InvalidArgument(
                "batch size must be at least 1".into(),
            ));
        }

        let mut state = self.lock();
        if state.entries.is_empty() {
            return Err(RotationError::Empty);
        }
        let mut batch = Vec::with_capacity(count.min(BATCH_PREALLOC_LIMIT));
        for _ in 0..count {
            batch.push(state.select()?);
        }
        Ok(batch)
    }

    /// Value the cursor rests on, if any. Does not select.
    pub fn current(&self) -> Option<T> {
        let state = self.lock();
        match state.cursor {
            Cursor::At(handle) => state.entries.get(handle).map(|e| e.value().clone()),
            Cursor::Unset | Cursor::Pending(_) => None,
        }
    }

    /// Copy out every entry with its weight and counter, in rotation order.
    pub fn snapshot(&self) -> Vec<EntrySnapshot<T>> {
        let state = self.lock();
        state
            .entries
            .iter()
            .map(|(handle, entry)| EntrySnapshot {
                value: entry.value().clone(),
                weight: entry.weight(),
                usage: entry.usage(),
                current: state.cursor == Cursor::At(handle),
                pending: state.cursor == Cursor::Pending(handle),
            })
            .collect()
    }
}

fn check_amount(amount: u32) -> RotationResult<()> {
    if amount == 0 {
        return Err(RotationError::InvalidArgument(
            "weight amount must be at least 1".into(),
        ));
    }
    Ok(())
}

impl<T> Default for Rotation<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Rotation<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T> FromIterator<T> for Rotation<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: fmt::Debug> fmt::Debug for Rotation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Rotation")
            .field("entries", &state.entries)
            .field("cursor", &state.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::DEFAULT_AMOUNT;
    use crate::error::ErrorKind;

    fn five() -> Rotation<i32> {
        Rotation::new([1, 2, 3, 4, 5])
    }

    fn take(rotation: &Rotation<i32>, n: usize) -> Vec<i32> {
        (0..n).map(|_| rotation.next().unwrap()).collect()
    }

    #[test]
    fn uniform_weights_cycle_in_order() {
        let rr = five();
        assert_eq!(take(&rr, 10), vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn initial_weights_repeat_entries() {
        let rr = Rotation::with_weights([1, 2, 3, 4, 5], [0, 1, 0, 0, 0]).unwrap();
        assert_eq!(take(&rr, 10), vec![1, 2, 2, 3, 4, 5, 1, 2, 2, 3]);
    }

    #[test]
    fn weight_count_mismatch_is_rejected() {
        let err = Rotation::with_weights([1, 2, 3], [0, 1]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn increase_weight_repeats_entry() {
        let rr = five();
        assert_eq!(rr.increase_weight(&1, 2).unwrap(), 1);
        assert_eq!(take(&rr, 10), vec![1, 1, 1, 2, 3, 4, 5, 1, 1, 1]);
    }

    #[test]
    fn decrease_weight_clamps_at_zero() {
        let rr = five();
        rr.reset_all_weights(1);
        rr.decrease_weight(&1, 2).unwrap();

        assert_eq!(rr.weight_of(&1), Some(0));
        assert_eq!(take(&rr, 10), vec![1, 2, 2, 3, 3, 4, 4, 5, 5, 1]);
    }

    #[test]
    fn zero_amount_is_rejected_without_change() {
        let rr = five();
        rr.reset_weight(&3, 2);

        let err = rr.increase_weight(&3, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = rr.decrease_weight(&3, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(rr.weight_of(&3), Some(2));
    }

    #[test]
    fn weight_operations_apply_to_all_duplicates() {
        let rr = Rotation::new(["a", "b", "a"]);
        assert_eq!(rr.increase_weight(&"a", DEFAULT_AMOUNT).unwrap(), 2);

        let weights: Vec<u32> = rr.snapshot().iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![1, 0, 1]);

        assert_eq!(rr.reset_weight(&"a", 0), 2);
        assert_eq!(rr.reset_weight(&"zzz", 4), 0);
    }

    #[test]
    fn reset_to_positions_cursor_on_entry() {
        let rr = five();
        rr.reset_to(&4).unwrap();
        assert_eq!(rr.current(), Some(4));
        assert_eq!(take(&rr, 10), vec![5, 1, 2, 3, 4, 5, 1, 2, 3, 4]);
    }

    #[test]
    fn reset_to_missing_value_leaves_cursor() {
        let rr = five();
        take(&rr, 2);

        let err = rr.reset_to(&42).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(rr.current(), Some(2));
        assert_eq!(rr.next().unwrap(), 3);
    }

    #[test]
    fn reset_to_gives_left_entry_a_full_visit() {
        let rr = Rotation::with_weights([1, 2, 3], [0, 3, 0]).unwrap();
        assert_eq!(take(&rr, 3), vec![1, 2, 2]);

        rr.reset_to(&3).unwrap();
        assert_eq!(rr.snapshot()[1].usage, 0);
        assert_eq!(take(&rr, 6), vec![1, 2, 2, 2, 2, 3]);
    }

    #[test]
    fn reset_to_current_entry_keeps_its_counter() {
        let rr = Rotation::with_weights([1, 2], [2, 0]).unwrap();
        assert_eq!(take(&rr, 2), vec![1, 1]);

        rr.reset_to(&1).unwrap();
        assert_eq!(rr.snapshot()[0].usage, 1);
        assert_eq!(take(&rr, 2), vec![1, 2]);
    }

    #[test]
    fn topology_operations_use_first_duplicate() {
        fn values(rr: &Rotation<&'static str>) -> Vec<&'static str> {
            rr.snapshot().into_iter().map(|s| s.value).collect()
        }

        let rr = Rotation::new(["a", "b", "a"]);
        assert!(rr.remove(&"a").unwrap());
        assert_eq!(values(&rr), vec!["b", "a"]);

        let rr = Rotation::new(["a", "b", "a"]);
        rr.add_after(&"a", "x", 0).unwrap();
        assert_eq!(values(&rr), vec!["a", "x", "b", "a"]);
        rr.add_before(&"a", "y", 0).unwrap();
        assert_eq!(values(&rr), vec!["y", "a", "x", "b", "a"]);

        let rr = Rotation::new(["a", "b", "a"]);
        rr.reset_to(&"a").unwrap();
        let snapshot = rr.snapshot();
        assert!(snapshot[0].current);
        assert!(!snapshot[2].current);
        assert_eq!(rr.next().unwrap(), "b");
    }

    #[test]
    fn weight_operation_with_panicking_eq_changes_nothing() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        #[derive(Clone)]
        struct Flaky(u32);
        impl PartialEq for Flaky {
            fn eq(&self, other: &Self) -> bool {
                if self.0 == 3 {
                    panic!("comparison failed");
                }
                self.0 == other.0
            }
        }

        let rr = Rotation::new([Flaky(1), Flaky(2), Flaky(1), Flaky(3)]);
        let result = catch_unwind(AssertUnwindSafe(|| rr.increase_weight(&Flaky(1), 5)));
        assert!(result.is_err());

        let weights: Vec<u32> = rr.snapshot().iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![0, 0, 0, 0]);
    }

    #[test]
    fn huge_batch_on_empty_rotation_fails_cleanly() {
        let rr: Rotation<i32> = Rotation::empty();
        assert_eq!(
            rr.next_batch(usize::MAX).unwrap_err().kind(),
            ErrorKind::EmptyCollection
        );
        rr.add_last(1, 0);
        assert_eq!(rr.next_batch(2).unwrap(), vec![1, 1]);
    }

    #[test]
    fn reset_restarts_from_first_entry() {
        let rr = Rotation::with_weights([1, 2, 3], [0, 2, 0]).unwrap();
        assert_eq!(take(&rr, 3), vec![1, 2, 2]);

        rr.reset(true);
        assert_eq!(rr.current(), None);
        assert!(rr.snapshot().iter().all(|s| s.usage == 0));
        assert_eq!(take(&rr, 5), vec![1, 2, 2, 2, 3]);
    }

    #[test]
    fn reset_without_counters_keeps_usage() {
        let rr = Rotation::with_weights([1, 2], [3, 0]).unwrap();
        // First pick does not consume weight; the next two do.
        assert_eq!(take(&rr, 3), vec![1, 1, 1]);

        rr.reset(false);
        assert_eq!(rr.snapshot()[0].usage, 2);
        // 1 is returned on restart and has one repeat left.
        assert_eq!(take(&rr, 3), vec![1, 1, 2]);
    }

    #[test]
    fn removing_current_entry_continues_with_successor() {
        let rr = five();
        assert_eq!(take(&rr, 3), vec![1, 2, 3]);

        assert!(rr.remove(&3).unwrap());
        assert_eq!(rr.current(), None);
        assert_eq!(take(&rr, 4), vec![4, 5, 1, 2]);
    }

    #[test]
    fn removing_current_tail_wraps_to_head() {
        let rr = five();
        take(&rr, 5);

        assert!(rr.remove(&5).unwrap());
        assert_eq!(take(&rr, 3), vec![1, 2, 3]);
    }

    #[test]
    fn removing_pending_entry_moves_on_again() {
        let rr = five();
        take(&rr, 2);
        rr.remove(&2).unwrap();
        rr.remove(&3).unwrap();

        let snapshot = rr.snapshot();
        assert!(snapshot.iter().any(|s| s.value == 4 && s.pending));
        assert_eq!(rr.next().unwrap(), 4);
    }

    #[test]
    fn removing_other_entry_keeps_cursor() {
        let rr = five();
        take(&rr, 2);
        assert!(rr.remove(&4).unwrap());
        assert_eq!(rr.current(), Some(2));
        assert_eq!(take(&rr, 4), vec![3, 5, 1, 2]);
    }

    #[test]
    fn removing_missing_value_returns_false() {
        let rr = five();
        assert!(!rr.remove(&99).unwrap());
        assert_eq!(rr.len(), 5);
    }

    #[test]
    fn removing_last_entry_is_refused() {
        let rr = Rotation::new(["only"]);
        let err = rr.remove(&"only").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert_eq!(rr.len(), 1);
        assert_eq!(rr.next().unwrap(), "only");
    }

    #[test]
    fn single_entry_repeats_weight_plus_one_times() {
        for weight in 0..5u32 {
            let rr = Rotation::with_weights(["a", "b"], [weight, 0]).unwrap();
            rr.remove(&"b").unwrap();
            rr.add_last("b", 0);

            let run = take_str(&rr, weight as usize + 2);
            let a_run = run.iter().take_while(|v| **v == "a").count();
            assert_eq!(a_run, weight as usize + 1, "weight {weight}");
        }
    }

    fn take_str(rotation: &Rotation<&'static str>, n: usize) -> Vec<&'static str> {
        (0..n).map(|_| rotation.next().unwrap()).collect()
    }

    #[test]
    fn add_at_ends_and_around_anchor() {
        let rr = Rotation::new([2, 4]);
        rr.add_first(1, 0);
        rr.add_last(6, 0);
        rr.add_before(&4, 3, 0).unwrap();
        rr.add_after(&4, 5, 0).unwrap();

        assert_eq!(rr.len(), 6);
        assert_eq!(take(&rr, 6), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn add_around_missing_anchor_fails() {
        let rr = five();
        assert_eq!(rr.add_before(&9, 0, 0).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(rr.add_after(&9, 0, 0).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(rr.len(), 5);
    }

    #[test]
    fn add_does_not_move_cursor() {
        let rr = five();
        take(&rr, 2);
        rr.add_first(0, 0);
        rr.add_after(&2, 7, 0).unwrap();
        assert_eq!(rr.current(), Some(2));
        assert_eq!(take(&rr, 3), vec![7, 3, 4]);
    }

    #[test]
    fn next_on_empty_rotation_fails() {
        let rr: Rotation<i32> = Rotation::empty();
        assert_eq!(rr.next().unwrap_err().kind(), ErrorKind::EmptyCollection);
        assert_eq!(
            rr.next_batch(3).unwrap_err().kind(),
            ErrorKind::EmptyCollection
        );
        assert!(rr.is_empty());
    }

    #[test]
    fn empty_rotation_can_be_filled() {
        let rr = Rotation::default();
        rr.add_last("x", 1);
        assert_eq!(take_str(&rr, 3), vec!["x", "x", "x"]);
    }

    #[test]
    fn batch_rejects_zero_count() {
        let rr = five();
        assert_eq!(
            rr.next_batch(0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(rr.current(), None);
    }

    #[test]
    fn batches_split_transparently() {
        let whole = Rotation::with_weights([1, 2, 3], [1, 0, 2]).unwrap();
        let split = Rotation::with_weights([1, 2, 3], [1, 0, 2]).unwrap();

        let mut joined = split.next_batch(4).unwrap();
        joined.extend(split.next_batch(7).unwrap());
        assert_eq!(whole.next_batch(11).unwrap(), joined);
    }

    #[test]
    fn snapshot_marks_current_entry() {
        let rr = Rotation::with_weights(["a", "b"], [2, 0]).unwrap();
        take_str(&rr, 2);

        let snapshot = rr.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].value, "a");
        assert_eq!(snapshot[0].weight, 2);
        assert_eq!(snapshot[0].usage, 1);
        assert!(snapshot[0].current);
        assert!(!snapshot[1].current);
    }

    #[test]
    fn snapshot_serializes_as_json() {
        let rr = Rotation::new(["a"]);
        rr.next().unwrap();
        let json = serde_json::to_value(rr.snapshot()).unwrap();
        assert_eq!(json[0]["value"], "a");
        assert_eq!(json[0]["current"], true);
        assert_eq!(json[0]["pending"], false);
    }

    #[test]
    fn collects_from_iterator() {
        let rr: Rotation<char> = "abc".chars().collect();
        assert_eq!(rr.len(), 3);
        assert!(rr.contains(&'b'));
        assert!(!rr.contains(&'z'));
        assert_eq!(Rotation::from(vec![1, 2]).len(), 2);
    }
}
