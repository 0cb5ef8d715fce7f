//! The JSON value: a tagged union over null, string, list and map.
//!
//! Numbers and booleans are not distinct tags. They live inside the string
//! variant as their rendered text, and [`Value::is_number`],
//! [`Value::is_true`] and [`Value::is_false`] classify that text on demand.
//! The writer relies on the same classification to decide which strings can
//! be emitted without quotes.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Error, ErrorKind};
use crate::key::HashedKey;
use crate::num;
use crate::table::HashTable;
use crate::writer;

#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

/// Shared fallback for the non-panicking index operators.
pub(crate) static NULL: Value = Value::Null;

/// A JSON value.
///
/// `Value` starts as [`Null`](Value::Null) and changes tag either explicitly
/// through the `make_*` methods or implicitly when a mutating accessor needs
/// a list or map: pushing to a null value turns it into a list, writing to a
/// key of a null value turns it into a map. Read-only accessors never change
/// the tag; they report errors instead.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    String(Box<str>),
    List(Vec<Value>),
    Map(HashTable),
}

impl Value {
    /// Creates a null value.
    #[inline]
    pub fn new() -> Self {
        Value::Null
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(..))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(..))
    }

    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(..))
    }

    /// Whether this value holds number text, such as `"42"` or `"-1.5e3"`.
    pub fn is_number(&self) -> bool {
        match self {
            Value::String(text) => num::is_number(text),
            _ => false,
        }
    }

    /// Whether this value holds exactly the text `"true"`.
    pub fn is_true(&self) -> bool {
        match self {
            Value::String(text) => num::is_true(text),
            _ => false,
        }
    }

    /// Whether this value holds exactly the text `"false"`.
    pub fn is_false(&self) -> bool {
        match self {
            Value::String(text) => num::is_false(text),
            _ => false,
        }
    }

    /// Tag name for error messages.
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(..) => "string",
            Value::List(..) => "list",
            Value::Map(..) => "map",
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(elements) => Some(elements),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(elements) => Some(elements),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&HashTable> {
        match self {
            Value::Map(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut HashTable> {
        match self {
            Value::Map(table) => Some(table),
            _ => None,
        }
    }

    pub fn expect_str(&self) -> Result<&str, Error> {
        match self {
            Value::String(text) => Ok(text),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn expect_list(&self) -> Result<&[Value], Error> {
        match self {
            Value::List(elements) => Ok(elements),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn expect_list_mut(&mut self) -> Result<&mut Vec<Value>, Error> {
        match self {
            Value::List(elements) => Ok(elements),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn expect_map(&self) -> Result<&HashTable, Error> {
        match self {
            Value::Map(table) => Ok(table),
            other => Err(other.mismatch("map")),
        }
    }

    pub fn expect_map_mut(&mut self) -> Result<&mut HashTable, Error> {
        match self {
            Value::Map(table) => Ok(table),
            other => Err(other.mismatch("map")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        ErrorKind::TypeMismatch {
            expected,
            found: self.type_str(),
        }
        .into()
    }

    /// Parses the held number text as an `i64`.
    pub fn to_i64(&self) -> Result<i64, Error> {
        let text = self.expect_str()?;
        num::parse_i64(text).ok_or_else(|| ErrorKind::InvalidNumber.into())
    }

    /// Parses the held number text as a `u64`.
    pub fn to_u64(&self) -> Result<u64, Error> {
        let text = self.expect_str()?;
        num::parse_u64(text).ok_or_else(|| ErrorKind::InvalidNumber.into())
    }

    /// Parses the held number text as an `f64`.
    pub fn to_f64(&self) -> Result<f64, Error> {
        let text = self.expect_str()?;
        num::parse_f64(text).ok_or_else(|| ErrorKind::InvalidNumber.into())
    }

    /// Resets to null, dropping any held body.
    pub fn make_null(&mut self) {
        *self = Value::Null;
    }

    /// Switches to the string tag. A value that already is a string keeps
    /// its text; anything else becomes the empty string.
    pub fn make_string(&mut self) {
        if !self.is_string() {
            *self = Value::String("".into());
        }
    }

    /// Switches to the list tag. A value that already is a list keeps its
    /// elements; anything else becomes an empty list.
    pub fn make_list(&mut self) {
        if !self.is_list() {
            *self = Value::List(Vec::new());
        }
    }

    /// Switches to the map tag. A value that already is a map keeps its
    /// pairs; anything else becomes an empty map.
    pub fn make_map(&mut self) {
        if !self.is_map() {
            *self = Value::Map(HashTable::new());
        }
    }

    fn table_for_insert(&mut self) -> Result<&mut HashTable, Error> {
        if self.is_null() {
            *self = Value::Map(HashTable::new());
        }
        match self {
            Value::Map(table) => Ok(table),
            other => Err(other.mismatch("map")),
        }
    }

    fn list_for_insert(&mut self) -> Result<&mut Vec<Value>, Error> {
        if self.is_null() {
            *self = Value::List(Vec::new());
        }
        match self {
            Value::List(elements) => Ok(elements),
            other => Err(other.mismatch("list")),
        }
    }

    /// Writes `value` under `key`, replacing the existing value if the key
    /// is already present. A null value becomes a map first.
    ///
    /// This is the only layer that keeps keys unique: it checks before it
    /// inserts, so a map built through `set` never holds duplicates.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();
        let table = self.table_for_insert()?;
        let hashed = HashedKey::new(key);
        if let Some(cursor) = table.find(hashed) {
            if let Some(existing) = table.value_mut(cursor) {
                *existing = value;
                return Ok(());
            }
        }
        table.emplace(hashed, value);
        Ok(())
    }

    /// Returns the value under `key`, inserting null there first when the
    /// key is missing. A null value becomes a map first.
    pub fn entry(&mut self, key: &str) -> Result<&mut Value, Error> {
        let table = self.table_for_insert()?;
        let hashed = HashedKey::new(key);
        let cursor = match table.find(hashed) {
            Some(cursor) => cursor,
            None => table.emplace(hashed, Value::Null),
        };
        table
            .value_mut(cursor)
            .ok_or_else(|| ErrorKind::KeyNotFound(key.into()).into())
    }

    /// Returns the value under `key`, or an error naming what went wrong.
    /// Never changes the tag.
    pub fn at(&self, key: &str) -> Result<&Value, Error> {
        let table = self.expect_map()?;
        table
            .get(key)
            .ok_or_else(|| ErrorKind::KeyNotFound(key.into()).into())
    }

    /// Returns the value under `key` when this is a map holding it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(table) => table.get(key),
            _ => None,
        }
    }

    /// Removes `key` and returns its value when this is a map holding it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Map(table) => table.remove(key),
            _ => None,
        }
    }

    /// Appends `value` to the list. A null value becomes a list first.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), Error> {
        let list = self.list_for_insert()?;
        list.push(value.into());
        Ok(())
    }

    /// Returns the element at `index`, first growing the list with nulls
    /// through `index` if it is short. A null value becomes a list first.
    pub fn entry_index(&mut self, index: usize) -> Result<&mut Value, Error> {
        let list = self.list_for_insert()?;
        if index >= list.len() {
            list.resize_with(index + 1, Value::default);
        }
        Ok(&mut list[index])
    }

    /// Returns the element at `index`, or an error naming what went wrong.
    /// Never changes the tag or the length.
    pub fn at_index(&self, index: usize) -> Result<&Value, Error> {
        let list = self.expect_list()?;
        list.get(index).ok_or_else(|| {
            ErrorKind::IndexOutOfBounds {
                index,
                len: list.len(),
            }
            .into()
        })
    }

    /// Returns the element at `index` when this is a list that long.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::List(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Element count for lists and maps, byte length for strings, zero for
    /// null.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::String(text) => text.len(),
            Value::List(elements) => elements.len(),
            Value::Map(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves the value out, leaving null behind.
    #[inline]
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Exchanges the contents of two values by moving each through a
    /// temporary.
    pub fn swap(&mut self, other: &mut Value) {
        let tmp = self.take();
        *self = other.take();
        *other = tmp;
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(text: &str) -> Value {
        Value::String(text.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(text: String) -> Value {
        Value::String(text.into_boxed_str())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Value {
        Value::String(if value { "true" } else { "false" }.into())
    }
}

macro_rules! from_integer {
    ($($int:ty => $push:ident),* $(,)?) => {$(
        impl From<$int> for Value {
            fn from(value: $int) -> Value {
                let mut text = String::new();
                num::$push(&mut text, value as _);
                Value::String(text.into_boxed_str())
            }
        }
    )*};
}

from_integer! {
    i8 => push_i64,
    i16 => push_i64,
    i32 => push_i64,
    i64 => push_i64,
    isize => push_i64,
    u8 => push_u64,
    u16 => push_u64,
    u32 => push_u64,
    u64 => push_u64,
    usize => push_u64,
}

/// Non-finite floats have no JSON rendering and become null.
impl From<f64> for Value {
    fn from(value: f64) -> Value {
        if !value.is_finite() {
            return Value::Null;
        }
        let mut text = String::new();
        num::push_f64(&mut text, value);
        Value::String(text.into_boxed_str())
    }
}

/// Non-finite floats have no JSON rendering and become null.
impl From<f32> for Value {
    fn from(value: f32) -> Value {
        if !value.is_finite() {
            return Value::Null;
        }
        let mut text = String::new();
        num::push_f32(&mut text, value);
        Value::String(text.into_boxed_str())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(elements: Vec<T>) -> Value {
        Value::List(elements.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Value {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl From<HashTable> for Value {
    #[inline]
    fn from(table: HashTable) -> Value {
        Value::Map(table)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Value {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

/// Maps compare order-independently; a value always equals itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Serialized JSON, compact.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writer::write_value(&mut out, self);
        f.write_str(&out)
    }
}

/// Falls back to a shared null on a missing key or a non-map value, so
/// lookups chain without panicking: `value["a"]["b"][0]`.
impl Index<&str> for Value {
    type Output = Value;

    #[inline]
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Inserts null under missing keys, turning a null value into a map first.
///
/// # Panics
///
/// Panics when the value is a string or list. [`Value::entry`] is the
/// checked form.
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self.entry(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Falls back to a shared null on an out-of-range index or a non-list
/// value.
impl Index<usize> for Value {
    type Output = Value;

    #[inline]
    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL)
    }
}

/// Grows the list with nulls through `index`, turning a null value into a
/// list first.
///
/// # Panics
///
/// Panics when the value is a string or map. [`Value::entry_index`] is the
/// checked form.
impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self.entry_index(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
