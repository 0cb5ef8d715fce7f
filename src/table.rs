//! Chained hash table mapping string keys to values.
//!
//! Each key hashes to exactly one bucket and collisions chain within that
//! bucket, so a lookup touches a single [`Slot`] no matter how full the rest
//! of the table is. The table itself accepts duplicate keys; callers that
//! want plain map semantics check [`HashTable::find`] before emplacing, which
//! is what [`Value::set`](crate::Value::set) does.

use std::fmt;

use crate::key::{HashedKey, Key};
use crate::slot::{self, Slot};
use crate::value::Value;

#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

/// Buckets allocated on the first emplace into a table created by
/// [`HashTable::new`].
const DEFAULT_CAPACITY: usize = 42;

/// Emplace grows the table once occupancy would reach this percentage.
const MAX_LOAD_PERCENT: usize = 75;

/// A position inside a [`HashTable`]: bucket index plus entry index within
/// the bucket's chain.
///
/// Cursors are plain copyable positions with no liveness tracking. Any
/// mutation of the table may invalidate previously obtained cursors; using a
/// stale cursor yields `None` from the accessors rather than undefined
/// behaviour, but the pair it names may have moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    bucket: usize,
    entry: usize,
}

/// Hash table with per-bucket chaining and string keys.
#[derive(Clone, Default)]
pub struct HashTable {
    slots: Vec<Slot>,
    count: usize,
}

impl HashTable {
    /// Creates an empty table. No buckets are allocated until the first
    /// emplace.
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
        }
    }

    /// Creates a table with `capacity` buckets, clamped to at least one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity.max(1)],
            count: 0,
        }
    }

    /// Number of stored pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets. Zero until the first emplace of a lazily created
    /// table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Inserts a pair and returns a cursor to it. The key text is copied
    /// into the table.
    ///
    /// Does **not** check for duplicates: emplacing an existing key stores a
    /// second pair under it. [`find`](Self::find) returns whichever pair
    /// comes first in the chain.
    pub fn emplace(&mut self, key: HashedKey<'_>, value: Value) -> Cursor {
        if self.slots.is_empty() {
            self.slots = vec![Slot::Empty; DEFAULT_CAPACITY];
        } else if (self.count + 1) * 100 / self.slots.len() >= MAX_LOAD_PERCENT {
            self.grow();
        }
        let bucket = self.bucket_of(key.hash());
        let entry = self.slots[bucket].push(key.to_owned_key(), value);
        self.count += 1;
        Cursor { bucket, entry }
    }

    /// Rehashes every pair into a table with twice as many buckets. The new
    /// bucket vector is fully built before it replaces the old one.
    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let mut grown = vec![Slot::Empty; new_capacity];
        for slot in std::mem::take(&mut self.slots) {
            for (key, value) in slot {
                let bucket = (key.hash() % new_capacity as u64) as usize;
                grown[bucket].push(key, value);
            }
        }
        self.slots = grown;
    }

    /// Returns a cursor to the first pair matching `key`.
    pub fn find(&self, key: HashedKey<'_>) -> Option<Cursor> {
        if self.slots.is_empty() {
            return None;
        }
        let bucket = self.bucket_of(key.hash());
        let entry = self.slots[bucket].find(key)?;
        Some(Cursor { bucket, entry })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(HashedKey::new(key)).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let cursor = self.find(HashedKey::new(key))?;
        self.pair(cursor).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let cursor = self.find(HashedKey::new(key))?;
        self.value_mut(cursor)
    }

    /// Returns the pair at `cursor`, or `None` if the cursor is stale.
    pub fn pair(&self, cursor: Cursor) -> Option<(&str, &Value)> {
        self.slots
            .get(cursor.bucket)?
            .get(cursor.entry)
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn pair_mut(&mut self, cursor: Cursor) -> Option<(&str, &mut Value)> {
        self.slots
            .get_mut(cursor.bucket)?
            .get_mut(cursor.entry)
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn value_mut(&mut self, cursor: Cursor) -> Option<&mut Value> {
        self.pair_mut(cursor).map(|(_, value)| value)
    }

    /// Removes the pair at `cursor` and returns a cursor to the pair after
    /// it in iteration order, or `None` when the removed pair was the last.
    ///
    /// Stale cursors remove nothing and advance from their bucket.
    pub fn erase(&mut self, cursor: Cursor) -> Option<Cursor> {
        if let Some(slot) = self.slots.get_mut(cursor.bucket) {
            if slot.remove(cursor.entry).is_some() {
                self.count -= 1;
            }
            // Later entries shift down one place, so the erased position now
            // names the chain's next pair when one remains.
            if slot.get(cursor.entry).is_some() {
                return Some(cursor);
            }
            return self.cursor_after_bucket(cursor.bucket);
        }
        None
    }

    /// Removes the first pair matching `key` and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let cursor = self.find(HashedKey::new(key))?;
        let (_, value) = self.slots[cursor.bucket].remove(cursor.entry)?;
        self.count -= 1;
        Some(value)
    }

    /// Drops every pair and releases the buckets; the next emplace starts
    /// from the default capacity again.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.count = 0;
    }

    /// Cursor to the first pair in iteration order.
    pub fn first_cursor(&self) -> Option<Cursor> {
        let bucket = self.slots.iter().position(|slot| !slot.is_empty())?;
        Some(Cursor { bucket, entry: 0 })
    }

    /// Cursor to the pair after `cursor` in iteration order.
    pub fn advance(&self, cursor: Cursor) -> Option<Cursor> {
        let slot = self.slots.get(cursor.bucket)?;
        if cursor.entry + 1 < slot.len() {
            return Some(Cursor {
                bucket: cursor.bucket,
                entry: cursor.entry + 1,
            });
        }
        self.cursor_after_bucket(cursor.bucket)
    }

    fn cursor_after_bucket(&self, bucket: usize) -> Option<Cursor> {
        for (offset, slot) in self.slots[bucket + 1..].iter().enumerate() {
            if !slot.is_empty() {
                return Some(Cursor {
                    bucket: bucket + 1 + offset,
                    entry: 0,
                });
            }
        }
        None
    }

    /// Iterates pairs in bucket order, which is unrelated to insertion
    /// order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            current: slot::Iter::Empty,
            remaining: self.count,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            slots: self.slots.iter_mut(),
            current: slot::IterMut::Empty,
            remaining: self.count,
        }
    }

    /// Number of pairs equal to `(key, value)`. Same-key pairs share one
    /// bucket, so this only walks a single chain.
    fn matching_pairs(&self, key: HashedKey<'_>, value: &Value) -> usize {
        if self.slots.is_empty() {
            return 0;
        }
        self.slots[self.bucket_of(key.hash())]
            .iter()
            .filter(|(k, v)| **k == key && *v == value)
            .count()
    }
}

/// Compares as multisets of pairs: equal sizes and every pair of `self`
/// occurring the same number of times in `other`. Iteration order and bucket
/// capacity never matter.
impl PartialEq for HashTable {
    fn eq(&self, other: &Self) -> bool {
        if self.count != other.count {
            return false;
        }
        self.slots.iter().flat_map(Slot::iter).all(|(key, value)| {
            let key = key.borrowed();
            self.matching_pairs(key, value) == other.matching_pairs(key, value)
        })
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
    current: slot::Iter<'a>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<(&'a str, &'a Value)> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((key.as_str(), value));
            }
            self.current = self.slots.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

pub struct IterMut<'a> {
    slots: std::slice::IterMut<'a, Slot>,
    current: slot::IterMut<'a>,
    remaining: usize,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a str, &'a mut Value);

    fn next(&mut self) -> Option<(&'a str, &'a mut Value)> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((key.as_str(), value));
            }
            self.current = self.slots.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IterMut<'_> {}

pub struct IntoIter {
    slots: std::vec::IntoIter<Slot>,
    current: slot::IntoIter,
    remaining: usize,
}

impl Iterator for IntoIter {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<(Key, Value)> {
        loop {
            if let Some(pair) = self.current.next() {
                self.remaining -= 1;
                return Some(pair);
            }
            self.current = self.slots.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for HashTable {
    type Item = (Key, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter {
            remaining: self.count,
            slots: self.slots.into_iter(),
            current: slot::IntoIter::Empty,
        }
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut HashTable {
    type Item = (&'a str, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> IterMut<'a> {
        self.iter_mut()
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for HashTable {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        for (key, value) in iter {
            let key: String = key.into();
            table.emplace(HashedKey::new(&key), value);
        }
        table
    }
}

impl Extend<(String, Value)> for HashTable {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.emplace(HashedKey::new(&key), value);
        }
    }
}
