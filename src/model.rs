//! Conversions between [`Value`] trees and plain Rust types.
//!
//! [`FromValue`] reads a tree into a typed value, [`ToValue`] builds a tree
//! from one, and [`Fields`] walks a map's keys when binding a struct.

use crate::{Error, ErrorKind, HashTable, Value};
use foldhash::HashMap;
use std::{fmt::Display, str::FromStr};

#[cfg(test)]
#[path = "./model_tests.rs"]
mod tests;

/// Reads `Self` out of a borrowed [`Value`].
///
/// The value is not consumed; implementations clone or parse what they need.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, Error>;
}

/// Builds a [`Value`] tree from `&self`.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Helper for constructing an [`ErrorKind::TypeMismatch`].
#[inline]
pub fn expected(expected: &'static str, found: &Value) -> Error {
    Error::from(ErrorKind::TypeMismatch {
        expected,
        found: found.type_str(),
    })
}

/// Attempts to acquire a string and parse it, returning an error if the value
/// is not a string, or the parse implementation fails.
#[inline]
pub fn parse_str<T, E>(value: &Value) -> Result<T, Error>
where
    T: FromStr<Err = E>,
    E: Display,
{
    let text = value.expect_str()?;
    match text.parse() {
        Ok(parsed) => Ok(parsed),
        Err(err) => Err(Error::from(ErrorKind::Custom(
            format!("failed to parse string: {err}").into(),
        ))),
    }
}

/// A helper for binding a map's fields to a struct.
///
/// Keys looked up through [`required`](Self::required) and
/// [`optional`](Self::optional) are remembered, so that
/// [`expect_only_known`](Self::expect_only_known) can reject maps carrying
/// keys the caller never asked for.
pub struct Fields<'a> {
    table: &'a HashTable,
    /// The keys that have been requested so far. Anything else still in the
    /// table fails [`Self::expect_only_known`].
    requested: Vec<&'static str>,
}

impl<'a> Fields<'a> {
    /// Creates a helper for the value, failing if it is not a map.
    pub fn new(value: &'a Value) -> Result<Self, Error> {
        Ok(Self {
            table: value.expect_map()?,
            requested: Vec::new(),
        })
    }

    /// Returns true if the map contains the specified key.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Reads the specified key.
    ///
    /// # Errors
    /// - The key does not exist
    /// - The [`FromValue`] implementation for the type returns an error
    pub fn required<T: FromValue>(&mut self, name: &'static str) -> Result<T, Error> {
        self.requested.push(name);
        match self.table.get(name) {
            Some(value) => T::from_value(value),
            None => Err(Error::from(ErrorKind::MissingField(name))),
        }
    }

    /// Reads the specified key if it is present and non-null.
    ///
    /// A missing key and an explicit null both read as [`None`].
    pub fn optional<T: FromValue>(&mut self, name: &'static str) -> Result<Option<T>, Error> {
        self.requested.push(name);
        match self.table.get(name) {
            Some(value) => Option::<T>::from_value(value),
            None => Ok(None),
        }
    }

    /// Called when you are finished with this [`Fields`].
    ///
    /// Fails with [`ErrorKind::UnexpectedKeys`] if the map holds keys that
    /// were never requested, which can be considered equivalent to
    /// [`#[serde(deny_unknown_fields)]`](https://serde.rs/container-attrs.html#deny_unknown_fields).
    #[inline(never)]
    pub fn expect_only_known(self) -> Result<(), Error> {
        let mut keys = Vec::new();
        for (key, _) in self.table.iter() {
            if !self.requested.iter().any(|name| *name == key) {
                keys.push(key.to_owned());
            }
        }

        if keys.is_empty() {
            Ok(())
        } else {
            Err(Error::from(ErrorKind::UnexpectedKeys { keys }))
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, Error> {
        Ok(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value.expect_str() {
            Ok(text) => Ok(text.to_owned()),
            Err(err) => Err(err),
        }
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        self.as_str().into()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, Error> {
        if value.is_true() {
            Ok(true)
        } else if value.is_false() {
            Ok(false)
        } else {
            Err(expected("boolean", value))
        }
    }
}

fn integer_in_range(value: &Value, min: i64, max: i64, name: &'static str) -> Result<i64, Error> {
    let parsed = value.to_i64()?;
    if parsed >= min && parsed <= max {
        Ok(parsed)
    } else {
        Err(Error::from(ErrorKind::OutOfRange(name)))
    }
}

macro_rules! integer {
    ($($num:ty),+) => {$(
        impl FromValue for $num {
            fn from_value(value: &Value) -> Result<Self, Error> {
                match integer_in_range(value, <$num>::MIN as i64, <$num>::MAX as i64, stringify!($num)) {
                    Ok(i) => Ok(i as $num),
                    Err(e) => Err(e),
                }
            }
        }
    )+};
}

integer!(i8, i16, i32, isize, u8, u16, u32);

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        value.to_i64()
    }
}

fn unsigned_in_range(value: &Value, max: u64, name: &'static str) -> Result<u64, Error> {
    match value.to_u64() {
        Ok(parsed) if parsed <= max => Ok(parsed),
        Ok(_) => Err(Error::from(ErrorKind::OutOfRange(name))),
        Err(err) => {
            // Number text like "-1" parses signed but not unsigned.
            if value.to_i64().is_ok() {
                Err(Error::from(ErrorKind::OutOfRange(name)))
            } else {
                Err(err)
            }
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        unsigned_in_range(value, u64::MAX, "u64")
    }
}

impl FromValue for usize {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match unsigned_in_range(value, usize::MAX as u64, "usize") {
            Ok(i) => Ok(i as usize),
            Err(e) => Err(e),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        match value.to_f64() {
            Ok(f) => Ok(f as f32),
            Err(e) => Err(e),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, Error> {
        value.to_f64()
    }
}

macro_rules! primitive_to_value {
    ($($num:ty),+) => {$(
        impl ToValue for $num {
            fn to_value(&self) -> Value {
                Value::from(*self)
            }
        }
    )+};
}

primitive_to_value!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T> FromValue for Vec<T>
where
    T: FromValue,
{
    fn from_value(value: &Value) -> Result<Self, Error> {
        let elements = value.expect_list()?;
        let mut out = Vec::with_capacity(elements.len());
        for element in elements {
            out.push(T::from_value(element)?);
        }
        Ok(out)
    }
}

impl<T> ToValue for Vec<T>
where
    T: ToValue,
{
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(T::to_value).collect())
    }
}

impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn from_value(value: &Value) -> Result<Self, Error> {
        if value.is_null() {
            Ok(None)
        } else {
            match T::from_value(value) {
                Ok(v) => Ok(Some(v)),
                Err(e) => Err(e),
            }
        }
    }
}

impl<T> ToValue for Option<T>
where
    T: ToValue,
{
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T> FromValue for HashMap<String, T>
where
    T: FromValue,
{
    fn from_value(value: &Value) -> Result<Self, Error> {
        let table = value.expect_map()?;
        let mut out = HashMap::default();
        for (key, element) in table.iter() {
            out.insert(key.to_owned(), T::from_value(element)?);
        }
        Ok(out)
    }
}

impl<T> ToValue for HashMap<String, T>
where
    T: ToValue,
{
    fn to_value(&self) -> Value {
        let mut table = HashTable::with_capacity(self.len());
        for (key, element) in self {
            table.emplace(key.as_str().into(), element.to_value());
        }
        Value::Map(table)
    }
}
