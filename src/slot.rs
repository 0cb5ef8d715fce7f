//! A single bucket of the map backing store.
//!
//! Buckets spend most of their life holding zero or one pair, so the slot
//! encodes those states inline and only allocates a chain vector once a
//! second pair hashes into the same bucket.

use crate::key::{HashedKey, Key};
use crate::value::Value;

#[cfg(test)]
#[path = "./slot_tests.rs"]
mod tests;

/// One bucket: empty, a single inline pair, or a chain of two or more.
///
/// A `Chained` slot always holds at least two pairs; removal collapses a
/// one-entry chain back to `Occupied` so the invariant holds between calls.
#[derive(Clone, Debug)]
pub(crate) enum Slot {
    Empty,
    Occupied(Key, Value),
    Chained(Vec<(Key, Value)>),
}

impl Default for Slot {
    #[inline]
    fn default() -> Self {
        Slot::Empty
    }
}

impl Slot {
    /// Appends a pair and returns its entry index within the slot.
    ///
    /// Does **not** check for duplicates; the slot stores every pair it is
    /// given, in insertion order.
    pub(crate) fn push(&mut self, key: Key, value: Value) -> usize {
        match std::mem::take(self) {
            Slot::Empty => {
                *self = Slot::Occupied(key, value);
                0
            }
            Slot::Occupied(first_key, first_value) => {
                *self = Slot::Chained(vec![(first_key, first_value), (key, value)]);
                1
            }
            Slot::Chained(mut entries) => {
                entries.push((key, value));
                let index = entries.len() - 1;
                *self = Slot::Chained(entries);
                index
            }
        }
    }

    /// Returns the entry index of the first pair whose key matches.
    pub(crate) fn find(&self, key: HashedKey<'_>) -> Option<usize> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(k, _) => (*k == key).then_some(0),
            Slot::Chained(entries) => entries.iter().position(|(k, _)| *k == key),
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<(&Key, &Value)> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(k, v) => (index == 0).then_some((k, v)),
            Slot::Chained(entries) => entries.get(index).map(|(k, v)| (k, v)),
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<(&Key, &mut Value)> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(k, v) => {
                if index == 0 {
                    Some((&*k, v))
                } else {
                    None
                }
            }
            Slot::Chained(entries) => entries.get_mut(index).map(|(k, v)| (&*k, v)),
        }
    }

    /// Removes the pair at `index`, collapsing a one-entry chain back to
    /// `Occupied`. Returns `None` if the index is past the end.
    pub(crate) fn remove(&mut self, index: usize) -> Option<(Key, Value)> {
        match std::mem::take(self) {
            Slot::Empty => None,
            Slot::Occupied(key, value) => {
                if index == 0 {
                    Some((key, value))
                } else {
                    *self = Slot::Occupied(key, value);
                    None
                }
            }
            Slot::Chained(mut entries) => {
                if index >= entries.len() {
                    *self = Slot::Chained(entries);
                    return None;
                }
                let removed = entries.remove(index);
                if entries.len() == 1 {
                    if let Some((key, value)) = entries.pop() {
                        *self = Slot::Occupied(key, value);
                    }
                } else {
                    *self = Slot::Chained(entries);
                }
                Some(removed)
            }
        }
    }

    /// Number of pairs held by this slot.
    pub(crate) fn len(&self) -> usize {
        match self {
            Slot::Empty => 0,
            Slot::Occupied(..) => 1,
            Slot::Chained(entries) => entries.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        match self {
            Slot::Empty => Iter::Empty,
            Slot::Occupied(key, value) => Iter::One(Some((key, value))),
            Slot::Chained(entries) => Iter::Many(entries.iter()),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_> {
        match self {
            Slot::Empty => IterMut::Empty,
            Slot::Occupied(key, value) => IterMut::One(Some((&*key, value))),
            Slot::Chained(entries) => IterMut::Many(entries.iter_mut()),
        }
    }
}

pub(crate) enum Iter<'a> {
    Empty,
    One(Option<(&'a Key, &'a Value)>),
    Many(std::slice::Iter<'a, (Key, Value)>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<(&'a Key, &'a Value)> {
        match self {
            Iter::Empty => None,
            Iter::One(pair) => pair.take(),
            Iter::Many(entries) => entries.next().map(|(k, v)| (k, v)),
        }
    }
}

pub(crate) enum IterMut<'a> {
    Empty,
    One(Option<(&'a Key, &'a mut Value)>),
    Many(std::slice::IterMut<'a, (Key, Value)>),
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a Key, &'a mut Value);

    fn next(&mut self) -> Option<(&'a Key, &'a mut Value)> {
        match self {
            IterMut::Empty => None,
            IterMut::One(pair) => pair.take(),
            IterMut::Many(entries) => entries.next().map(|(k, v)| (&*k, v)),
        }
    }
}

impl IntoIterator for Slot {
    type Item = (Key, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        match self {
            Slot::Empty => IntoIter::Empty,
            Slot::Occupied(key, value) => IntoIter::One(Some((key, value))),
            Slot::Chained(entries) => IntoIter::Many(entries.into_iter()),
        }
    }
}

pub(crate) enum IntoIter {
    Empty,
    One(Option<(Key, Value)>),
    Many(std::vec::IntoIter<(Key, Value)>),
}

impl Iterator for IntoIter {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<(Key, Value)> {
        match self {
            IntoIter::Empty => None,
            IntoIter::One(pair) => pair.take(),
            IntoIter::Many(entries) => entries.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            IntoIter::Empty => 0,
            IntoIter::One(pair) => pair.is_some() as usize,
            IntoIter::Many(entries) => entries.len(),
        };
        (len, Some(len))
    }
}
