//! Iteration over the elements of a value.
//!
//! One iterator type walks both container tags: list elements come out
//! keyless and map entries carry their key. Iterators over null or string
//! values are detached, meaning they start at the end and never produce an
//! element.

use crate::error::{Error, ErrorKind};
use crate::table::{self, Cursor, HashTable};
use crate::value::Value;

#[cfg(test)]
#[path = "./iter_tests.rs"]
mod tests;

/// One element of a list or map.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Element<'a> {
    /// The entry's key for map-backed iteration, `None` for list-backed.
    pub key: Option<&'a str>,
    pub value: &'a Value,
}

/// One element of a list or map, with the value mutable.
#[derive(Debug)]
pub struct ElementMut<'a> {
    /// The entry's key for map-backed iteration, `None` for list-backed.
    pub key: Option<&'a str>,
    pub value: &'a mut Value,
}

/// Iterator over the elements of a value, created by [`Value::iter`].
///
/// Besides the `Iterator` impl this carries an explicit cursor surface:
/// [`get`](Self::get) reads the current element without moving, and
/// [`advance`](Self::advance) moves without reading.
pub struct ValueIter<'a> {
    state: State<'a>,
}

enum State<'a> {
    Detached,
    List {
        elements: &'a [Value],
        index: usize,
    },
    Map {
        table: &'a HashTable,
        cursor: Option<Cursor>,
    },
}

impl<'a> ValueIter<'a> {
    /// Whether the iterator is past the last element. Detached iterators
    /// are always at the end.
    pub fn is_end(&self) -> bool {
        self.get().is_none()
    }

    /// Returns the current element without advancing.
    pub fn get(&self) -> Option<Element<'a>> {
        match &self.state {
            State::Detached => None,
            State::List { elements, index } => elements
                .get(*index)
                .map(|value| Element { key: None, value }),
            State::Map { table, cursor } => {
                let at = (*cursor)?;
                table.pair(at).map(|(key, value)| Element {
                    key: Some(key),
                    value,
                })
            }
        }
    }

    /// Moves to the next element. At the end of a list or map this is a
    /// no-op; a detached iterator has nothing to move through and reports
    /// a logic error instead.
    pub fn advance(&mut self) -> Result<(), Error> {
        match &mut self.state {
            State::Detached => {
                Err(ErrorKind::Logic("cannot advance a null-backed iterator").into())
            }
            State::List { elements, index } => {
                if *index < elements.len() {
                    *index += 1;
                }
                Ok(())
            }
            State::Map { table, cursor } => {
                if let Some(at) = *cursor {
                    *cursor = table.advance(at);
                }
                Ok(())
            }
        }
    }
}

impl<'a> Iterator for ValueIter<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Element<'a>> {
        match &mut self.state {
            State::Detached => None,
            State::List { elements, index } => {
                let value = elements.get(*index)?;
                *index += 1;
                Some(Element { key: None, value })
            }
            State::Map { table, cursor } => {
                let at = (*cursor)?;
                let (key, value) = table.pair(at)?;
                *cursor = table.advance(at);
                Some(Element {
                    key: Some(key),
                    value,
                })
            }
        }
    }
}

/// Two iterators are equal when they walk the same backing store and stand
/// at the same position.
impl PartialEq for ValueIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (State::Detached, State::Detached) => true,
            (
                State::List {
                    elements: a,
                    index: i,
                },
                State::List {
                    elements: b,
                    index: j,
                },
            ) => std::ptr::eq(*a, *b) && i == j,
            (
                State::Map {
                    table: a,
                    cursor: i,
                },
                State::Map {
                    table: b,
                    cursor: j,
                },
            ) => std::ptr::eq(*a, *b) && i == j,
            _ => false,
        }
    }
}

/// Iterator over the elements of a value with mutable access to each value,
/// created by [`Value::iter_mut`].
pub struct ValueIterMut<'a> {
    state: StateMut<'a>,
}

enum StateMut<'a> {
    Detached,
    List(std::slice::IterMut<'a, Value>),
    Map(table::IterMut<'a>),
}

impl<'a> Iterator for ValueIterMut<'a> {
    type Item = ElementMut<'a>;

    fn next(&mut self) -> Option<ElementMut<'a>> {
        match &mut self.state {
            StateMut::Detached => None,
            StateMut::List(elements) => elements.next().map(|value| ElementMut { key: None, value }),
            StateMut::Map(pairs) => pairs.next().map(|(key, value)| ElementMut {
                key: Some(key),
                value,
            }),
        }
    }
}

impl Value {
    /// Iterates list elements or map entries. Null and string values yield
    /// a detached iterator, which is already at its end.
    pub fn iter(&self) -> ValueIter<'_> {
        let state = match self {
            Value::List(elements) => State::List { elements, index: 0 },
            Value::Map(table) => State::Map {
                table,
                cursor: table.first_cursor(),
            },
            _ => State::Detached,
        };
        ValueIter { state }
    }

    /// Like [`iter`](Self::iter) with mutable access to each element's
    /// value. Keys stay read-only.
    pub fn iter_mut(&mut self) -> ValueIterMut<'_> {
        let state = match self {
            Value::List(elements) => StateMut::List(elements.iter_mut()),
            Value::Map(table) => StateMut::Map(table.iter_mut()),
            _ => StateMut::Detached,
        };
        ValueIterMut { state }
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = Element<'a>;
    type IntoIter = ValueIter<'a>;

    fn into_iter(self) -> ValueIter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Value {
    type Item = ElementMut<'a>;
    type IntoIter = ValueIterMut<'a>;

    fn into_iter(self) -> ValueIterMut<'a> {
        self.iter_mut()
    }
}
