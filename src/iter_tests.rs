use super::*;

#[test]
fn lists_iterate_in_order_without_keys() {
    let value = Value::from(vec![10, 20, 30]);
    let elements: Vec<Element<'_>> = value.iter().collect();
    assert_eq!(elements.len(), 3);
    assert!(elements.iter().all(|element| element.key.is_none()));
    assert_eq!(elements[0].value.to_i64().unwrap(), 10);
    assert_eq!(elements[2].value.to_i64().unwrap(), 30);

    // for loops borrow through IntoIterator.
    let mut total = 0;
    for element in &value {
        total += element.value.to_i64().unwrap();
    }
    assert_eq!(total, 60);
}

#[test]
fn maps_iterate_with_keys() {
    let mut value = Value::new();
    value.set("host", "a").unwrap();
    value.set("port", 80).unwrap();

    let mut seen: Vec<(String, String)> = value
        .iter()
        .map(|element| (element.key.unwrap().to_string(), element.value.to_string()))
        .collect();
    seen.sort();
    assert_eq!(
        seen,
        [
            ("host".to_string(), "\"a\"".to_string()),
            ("port".to_string(), "80".to_string()),
        ]
    );
}

#[test]
fn detached_backings_yield_nothing() {
    assert!(Value::Null.iter().next().is_none());
    assert!(Value::from("text").iter().next().is_none());
    assert!(Value::Null.iter().is_end());

    // Advancing a detached iterator is a logic error, not a quiet no-op.
    let null = Value::Null;
    let mut iter = null.iter();
    let err = iter.advance().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Logic(_)));
    assert_eq!(err.to_string(), "cannot advance a null-backed iterator");

    let mut null = Value::Null;
    assert!(null.iter_mut().next().is_none());
    let mut text = Value::from("text");
    assert!(text.iter_mut().next().is_none());
}

#[test]
fn cursor_surface_reads_without_consuming() {
    let value = Value::from(vec![1, 2]);
    let mut iter = value.iter();

    assert!(!iter.is_end());
    // get does not move; two reads see the same element.
    assert_eq!(iter.get().unwrap().value.to_i64().unwrap(), 1);
    assert_eq!(iter.get().unwrap().value.to_i64().unwrap(), 1);

    iter.advance().unwrap();
    assert_eq!(iter.get().unwrap().value.to_i64().unwrap(), 2);
    iter.advance().unwrap();
    assert!(iter.is_end());
    assert!(iter.get().is_none());

    // Advancing past the end of a list stays put.
    iter.advance().unwrap();
    assert!(iter.is_end());
}

#[test]
fn map_cursors_step_entry_by_entry() {
    let mut value = Value::new();
    value.set("a", 1).unwrap();
    value.set("b", 2).unwrap();

    let mut iter = value.iter();
    let mut seen = Vec::new();
    while let Some(element) = iter.get() {
        seen.push(element.key.unwrap().to_string());
        iter.advance().unwrap();
    }
    assert_eq!(seen.len(), 2);
    assert!(seen.contains(&"a".to_string()));
    assert!(seen.contains(&"b".to_string()));

    // The end is sticky for maps too.
    iter.advance().unwrap();
    assert!(iter.get().is_none());
}

#[test]
fn equality_tracks_backing_and_position() {
    let value = Value::from(vec![1, 2]);
    let twin = Value::from(vec![1, 2]);

    let mut a = value.iter();
    let b = value.iter();
    assert!(a == b);

    // Same position over a different backing store is not equal.
    assert!(value.iter() != twin.iter());

    a.advance().unwrap();
    assert!(a != value.iter());
    let mut b = value.iter();
    b.advance().unwrap();
    assert!(a == b);

    // Detached iterators are all alike.
    assert!(Value::Null.iter() == Value::from("x").iter());
    assert!(Value::Null.iter() != value.iter());

    // Map iterators compare the same way.
    let mut map = Value::new();
    map.set("a", 1).unwrap();
    assert!(map.iter() == map.iter());
    let mut stepped = map.iter();
    stepped.advance().unwrap();
    assert!(stepped != map.iter());
}

#[test]
fn iter_mut_updates_in_place() {
    let mut value = Value::from(vec![1, 2, 3]);
    for element in value.iter_mut() {
        let doubled = element.value.to_i64().unwrap() * 2;
        *element.value = Value::from(doubled);
    }
    assert_eq!(value.to_string(), "[2,4,6]");

    let mut map = Value::new();
    map.set("a", 1).unwrap();
    map.set("b", 2).unwrap();
    for element in &mut map {
        if element.key == Some("a") {
            *element.value = Value::from("one");
        }
    }
    assert_eq!(map.at("a").unwrap(), "one");
    assert_eq!(map.at("b").unwrap().to_i64().unwrap(), 2);

    // Chained entries in one bucket still come through.
    let mut chained = Value::new();
    chained.set("alpha", 1).unwrap();
    chained.set("beta", 2).unwrap();
    for element in chained.iter_mut() {
        *element.value = Value::from(0);
    }
    assert_eq!(chained.to_string(), r#"{"alpha":0,"beta":0}"#);
}
