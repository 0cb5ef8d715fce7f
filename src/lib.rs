//! A JSON value library built around a chained-slot string hash table.
//!
//! Documents are held as trees of [`Value`]s: null, string, list, or map.
//! Numbers and booleans are kept in their text form and classified on
//! demand, so `42`, `true` and `"hello"` all live in the same string
//! representation and nothing is lost between [`parse`] and rendering.
//! Map keys cache their hash, giving lookups a cheap reject before any byte
//! comparison.
//!
//! # Examples
//!
//! ```
//! use json_strand::{Error, Fields, FromValue, Value};
//!
//! #[derive(Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! impl FromValue for Server {
//!     fn from_value(value: &Value) -> Result<Self, Error> {
//!         let mut fields = Fields::new(value)?;
//!         let server = Server {
//!             host: fields.required("host")?,
//!             port: fields.required("port")?,
//!             tags: fields.optional("tags")?.unwrap_or_default(),
//!         };
//!         // Error if unknown fields exist.
//!         fields.expect_only_known()?;
//!         Ok(server)
//!     }
//! }
//!
//! let content = r#"{
//!     "host": "svc.internal",
//!     "port": 8443,
//!     "tags": ["edge", "tls"]
//! }"#;
//!
//! let root = json_strand::parse(content)?;
//! let server = Server::from_value(&root)?;
//!
//! assert_eq!(server.host, "svc.internal");
//! assert_eq!(server.port, 8443);
//! assert_eq!(server.tags, ["edge", "tls"]);
//! # Ok::<(), Error>(())
//! ```
//!
//! Trees can also be built and edited directly; [`Value::set`] and friends
//! promote a null into the container they need:
//!
//! ```
//! use json_strand::{Error, Value};
//!
//! let mut root = Value::new();
//! root.set("name", "strand")?;
//! root.entry("limits")?.set("depth", 5)?;
//! assert_eq!(root.to_string(), r#"{"name":"strand","limits":{"depth":5}}"#);
//! # Ok::<(), Error>(())
//! ```

mod error;
mod iter;
mod key;
mod model;
mod num;
mod parser;
mod slot;
mod span;
mod table;
mod value;
mod writer;

pub use error::{Error, ErrorKind};
pub use iter::{Element, ElementMut, ValueIter, ValueIterMut};
pub use key::{HashedKey, Key, hash_key};
pub use model::{Fields, FromValue, ToValue, expected, parse_str};
pub use parser::parse;
pub use span::Span;
pub use table::{Cursor, HashTable};
pub use value::Value;

#[cfg(feature = "serde")]
pub mod impl_serde;
