use super::*;

#[test]
fn hash_reference_values() {
    // Seed alone for the empty string.
    assert_eq!(hash_key(""), 5381);

    // Values pinned so the function can never drift silently.
    assert_eq!(hash_key("a"), 177604);
    assert_eq!(hash_key("name"), 6382843298);
    assert_eq!(hash_key("Hello"), 210676100615);

    assert_eq!(hash_key("same"), hash_key("same"));
    assert_ne!(hash_key("same"), hash_key("Same"));
}

#[test]
fn hashed_key_basics() {
    let key = HashedKey::new("alpha");
    assert_eq!(key.as_str(), "alpha");
    assert_eq!(key.hash(), hash_key("alpha"));

    let from: HashedKey<'_> = "alpha".into();
    assert_eq!(from, key);

    assert_eq!(HashedKey::default().as_str(), "");
    assert_eq!(HashedKey::default().hash(), 5381);

    // Copy type: both bindings stay usable.
    let copied = key;
    assert_eq!(copied, key);
}

#[test]
fn equality_and_ordering() {
    let a = HashedKey::new("a");
    let b = HashedKey::new("b");
    assert_ne!(a, b);
    assert_eq!(a, HashedKey::new("a"));

    assert_eq!(a, *"a");
    assert_eq!(a, "a");
    assert!(a != "b");

    // Ordering follows the text, not the hashes.
    assert!(a < b);
    assert!(HashedKey::new("ab") > a);
    assert_eq!(a.partial_cmp(&b), Some(std::cmp::Ordering::Less));

    // Owned and borrowed keys compare across types, both directions.
    let owned = Key::from("a");
    assert_eq!(owned, a);
    assert_eq!(a, owned);
    assert!(owned != b);
    assert_eq!(owned, *"a");
    assert!(Key::from("b") > owned);
}

#[test]
fn owned_key_round_trip() {
    let key = Key::from("beta");
    assert_eq!(key.as_str(), "beta");
    assert_eq!(key.hash(), hash_key("beta"));

    let from_string = Key::from(String::from("beta"));
    assert_eq!(from_string, key);

    // Reborrowing carries the cached hash along.
    let borrowed = key.borrowed();
    assert_eq!(borrowed.as_str(), "beta");
    assert_eq!(borrowed.hash(), key.hash());
    assert_eq!(borrowed.to_owned_key(), key);

    assert_eq!(key.to_string(), "beta");
    assert_eq!(format!("{key:?}"), "\"beta\"");
    let hashed = HashedKey::new("beta");
    assert_eq!(hashed.to_string(), "beta");
    assert_eq!(format!("{hashed:?}"), "\"beta\"");
}

#[test]
fn std_map_contract() {
    // Hash and Borrow agree with plain strings, so owned keys work as map
    // keys looked up by &str.
    let mut map = std::collections::HashMap::new();
    map.insert(Key::from("alpha"), 1);
    map.insert(Key::from("beta"), 2);
    assert_eq!(map.get("alpha"), Some(&1));
    assert_eq!(map.get("beta"), Some(&2));
    assert!(map.get("gamma").is_none());

    let mut sorted = std::collections::BTreeMap::new();
    sorted.insert(Key::from("b"), 2);
    sorted.insert(Key::from("a"), 1);
    let keys: Vec<_> = sorted.keys().map(Key::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(sorted.get("a"), Some(&1));
}
