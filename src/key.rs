//! Hashed string keys for the map backing store.
//!
//! Lookups hash the query text once up front and carry the cached value
//! around, so probing a bucket can reject non-matching entries without
//! touching their bytes.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(test)]
#[path = "./key_tests.rs"]
mod tests;

const HASH_SEED: u64 = 5381;

/// Hashes key bytes with the shift-add-xor step `h = ((h << 5) + h) ^ byte`.
///
/// Every key in a [`HashTable`](crate::HashTable) is hashed with this exact
/// function; equal byte sequences always produce equal hashes.
#[inline]
pub fn hash_key(text: &str) -> u64 {
    let mut h = HASH_SEED;
    for &b in text.as_bytes() {
        h = ((h << 5).wrapping_add(h)) ^ b as u64;
    }
    h
}

/// A borrowed lookup key: a `&str` view plus its cached hash.
///
/// This is the query type for [`HashTable`](crate::HashTable) lookups; it
/// never owns or copies the text. The hash is computed once in
/// [`HashedKey::new`] and never changes afterwards.
#[derive(Copy, Clone)]
pub struct HashedKey<'a> {
    text: &'a str,
    hash: u64,
}

impl<'a> HashedKey<'a> {
    /// Wraps `text`, computing and caching its hash.
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            hash: hash_key(text),
        }
    }

    /// Returns the underlying text.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Returns the cached hash.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Copies the text into an owned [`Key`], reusing the cached hash.
    #[inline]
    pub(crate) fn to_owned_key(self) -> Key {
        Key {
            text: self.text.into(),
            hash: self.hash,
        }
    }
}

impl<'a> From<&'a str> for HashedKey<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl Default for HashedKey<'_> {
    #[inline]
    fn default() -> Self {
        Self::new("")
    }
}

impl PartialEq for HashedKey<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Cached hashes give an O(1) reject before the byte compare.
        self.hash == other.hash && self.text == other.text
    }
}

impl Eq for HashedKey<'_> {}

impl PartialEq<str> for HashedKey<'_> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for HashedKey<'_> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl PartialOrd for HashedKey<'_> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashedKey<'_> {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(other.text)
    }
}

impl Hash for HashedKey<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for HashedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl fmt::Debug for HashedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.text, f)
    }
}

/// An owned key stored inside a [`HashTable`](crate::HashTable).
///
/// Created only by copying a [`HashedKey`] during emplace: the table never
/// borrows caller-owned bytes, because its entries routinely outlive the
/// transient views used to insert them.
#[derive(Clone)]
pub struct Key {
    text: Box<str>,
    hash: u64,
}

impl Key {
    /// Returns the key text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the cached hash.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Reborrows as a [`HashedKey`] without re-hashing.
    #[inline]
    pub fn borrowed(&self) -> HashedKey<'_> {
        HashedKey {
            text: &self.text,
            hash: self.hash,
        }
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(text: &str) -> Self {
        HashedKey::new(text).to_owned_key()
    }
}

impl From<String> for Key {
    #[inline]
    fn from(text: String) -> Self {
        let hash = hash_key(&text);
        Self {
            text: text.into_boxed_str(),
            hash,
        }
    }
}

impl PartialEq for Key {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.text == other.text
    }
}

impl Eq for Key {}

impl PartialEq<HashedKey<'_>> for Key {
    #[inline]
    fn eq(&self, other: &HashedKey<'_>) -> bool {
        self.hash == other.hash && &*self.text == other.text
    }
}

impl PartialEq<Key> for HashedKey<'_> {
    #[inline]
    fn eq(&self, other: &Key) -> bool {
        other == self
    }
}

impl PartialEq<str> for Key {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.text == other
    }
}

impl PartialOrd for Key {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for Key {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Borrow<str> for Key {
    #[inline]
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Key {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.text, f)
    }
}
