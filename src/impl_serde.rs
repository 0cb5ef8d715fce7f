#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] support for [`Value`] and [`HashTable`].
//!
//! Values classify their text the same way [`Display`](std::fmt::Display)
//! does: `"true"` and `"false"` serialize as booleans and number text
//! serializes as a number, integer form preferred.

use crate::{HashTable, Value, num};

impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => ser.serialize_unit(),
            Value::String(text) => {
                if num::is_true(text) {
                    ser.serialize_bool(true)
                } else if num::is_false(text) {
                    ser.serialize_bool(false)
                } else if num::is_number(text) {
                    if let Some(i) = num::parse_i64(text) {
                        ser.serialize_i64(i)
                    } else if let Some(u) = num::parse_u64(text) {
                        ser.serialize_u64(u)
                    } else if let Some(f) = num::parse_f64(text) {
                        ser.serialize_f64(f)
                    } else {
                        ser.serialize_str(text)
                    }
                } else {
                    ser.serialize_str(text)
                }
            }
            Value::List(elements) => {
                use serde::ser::SerializeSeq;
                let mut seq = ser.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(table) => serde::Serialize::serialize(table, ser),
        }
    }
}

impl serde::Serialize for HashTable {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = ser.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
