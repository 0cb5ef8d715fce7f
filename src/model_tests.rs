use super::{Fields, FromValue, ToValue, parse_str};
use crate::{ErrorKind, Value};

fn read<T: FromValue>(input: &str) -> Result<T, crate::Error> {
    let root = crate::parse(input).unwrap();
    T::from_value(&root)
}

#[test]
fn read_strings() {
    let val: String = read(r#""hello""#).unwrap();
    assert_eq!(val, "hello");

    // Number text is still a string.
    let val: String = read("42").unwrap();
    assert_eq!(val, "42");

    let err = read::<String>("[1]").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: "string",
            found: "list"
        }
    ));
}

#[test]
fn read_booleans() {
    let val: bool = read("true").unwrap();
    assert!(val);

    let val: bool = read("false").unwrap();
    assert!(!val);

    // Only the exact texts count as booleans.
    let err = read::<bool>(r#""truex""#).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: "boolean",
            ..
        }
    ));

    let err = read::<bool>("null").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn read_integers() {
    // Signed types
    let val: i8 = read("42").unwrap();
    assert_eq!(val, 42);

    let val: i16 = read("1000").unwrap();
    assert_eq!(val, 1000);

    let val: i32 = read("100000").unwrap();
    assert_eq!(val, 100000);

    let val: i64 = read("9999999999").unwrap();
    assert_eq!(val, 9999999999);

    let val: isize = read("-42").unwrap();
    assert_eq!(val, -42);

    // Unsigned types
    let val: u8 = read("255").unwrap();
    assert_eq!(val, 255);

    let val: u16 = read("65535").unwrap();
    assert_eq!(val, 65535);

    let val: u32 = read("100000").unwrap();
    assert_eq!(val, 100000);

    let val: u64 = read("9999999999").unwrap();
    assert_eq!(val, 9999999999);

    // u64 keeps its full range since the digits are stored as text.
    let val: u64 = read("18446744073709551615").unwrap();
    assert_eq!(val, u64::MAX);

    let val: usize = read("42").unwrap();
    assert_eq!(val, 42);

    // Out-of-range errors
    let err = read::<i8>("200").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange("i8")));

    let err = read::<u8>("256").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange("u8")));

    let err = read::<u8>("-1").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange("u8")));

    let err = read::<u64>("-1").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange("u64")));

    let err = read::<usize>("-1").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange("usize")));

    // Text that is not number-shaped
    let err = read::<i32>(r#""not an int""#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNumber));

    // Fractions do not narrow to integers
    let err = read::<i64>("1.5").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNumber));

    // Wrong value shape entirely
    let err = read::<i32>("{}").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn read_floats() {
    let val: f32 = read("3.15").unwrap();
    assert!((val - 3.15_f32).abs() < 0.001);

    let val: f64 = read("3.15").unwrap();
    assert!((val - 3.15).abs() < f64::EPSILON);

    // Plain integers read as floats too.
    let val: f64 = read("2").unwrap();
    assert_eq!(val, 2.0);

    let err = read::<f64>(r#""not a float""#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNumber));

    let err = read::<f32>("[]").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn read_vecs() {
    let val: Vec<i64> = read("[1, 2, 3]").unwrap();
    assert_eq!(val, vec![1, 2, 3]);

    let val: Vec<String> = read(r#"["a", "b"]"#).unwrap();
    assert_eq!(val, vec!["a", "b"]);

    let val: Vec<i64> = read("[]").unwrap();
    assert!(val.is_empty());

    // Nested
    let val: Vec<Vec<i64>> = read("[[1], [2, 3]]").unwrap();
    assert_eq!(val, vec![vec![1], vec![2, 3]]);

    let err = read::<Vec<i64>>(r#""not a list""#).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: "list",
            ..
        }
    ));

    // The first bad element fails the whole read.
    let err = read::<Vec<i64>>(r#"[1, "bad", 3]"#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNumber));
}

#[test]
fn read_options() {
    let val: Option<i64> = read("42").unwrap();
    assert_eq!(val, Some(42));

    let val: Option<i64> = read("null").unwrap();
    assert_eq!(val, None);

    let err = read::<Option<i64>>(r#""bad""#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidNumber));

    // Null elements inside a list
    let val: Vec<Option<i64>> = read("[1, null, 3]").unwrap();
    assert_eq!(val, vec![Some(1), None, Some(3)]);
}

#[test]
fn read_hash_maps() {
    let val: foldhash::HashMap<String, i64> = read(r#"{"a": 1, "b": 2}"#).unwrap();
    assert_eq!(val.len(), 2);
    assert_eq!(val["a"], 1);
    assert_eq!(val["b"], 2);

    let val: foldhash::HashMap<String, i64> = read("{}").unwrap();
    assert!(val.is_empty());

    let err = read::<foldhash::HashMap<String, i64>>("[1]").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: "map",
            ..
        }
    ));
}

#[test]
fn read_value_passthrough() {
    let val: Value = read(r#"{"a": 1}"#).unwrap();
    assert_eq!(val.to_string(), r#"{"a":1}"#);
}

#[test]
fn fields_workflows() {
    // All fields consumed.
    let root = crate::parse(r#"{"name": "pod", "port": 8080}"#).unwrap();
    let mut fields = Fields::new(&root).unwrap();
    assert!(fields.contains("name"));
    assert!(!fields.contains("host"));
    let name: String = fields.required("name").unwrap();
    let port: u16 = fields.required("port").unwrap();
    assert_eq!(name, "pod");
    assert_eq!(port, 8080);
    fields.expect_only_known().unwrap();

    // Keys that were never requested fail the final check.
    let root = crate::parse(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
    let mut fields = Fields::new(&root).unwrap();
    let _: i64 = fields.required("a").unwrap();
    let err = fields.expect_only_known().unwrap_err();
    match err.kind {
        ErrorKind::UnexpectedKeys { keys } => {
            assert_eq!(keys.len(), 2);
            assert!(keys.contains(&"b".to_owned()));
            assert!(keys.contains(&"c".to_owned()));
        }
        other => panic!("expected UnexpectedKeys, got {other:?}"),
    }

    // Missing required key.
    let root = crate::parse(r#"{"a": 1}"#).unwrap();
    let mut fields = Fields::new(&root).unwrap();
    let err = fields.required::<i64>("nonexistent").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingField("nonexistent")));

    // optional: absent and explicit null both read as None.
    let root = crate::parse(r#"{"a": null, "b": 7}"#).unwrap();
    let mut fields = Fields::new(&root).unwrap();
    assert_eq!(fields.optional::<i64>("missing").unwrap(), None);
    assert_eq!(fields.optional::<i64>("a").unwrap(), None);
    assert_eq!(fields.optional::<i64>("b").unwrap(), Some(7));
    // optional still marks the key as known.
    fields.expect_only_known().unwrap();

    // optional propagates a bad value.
    let root = crate::parse(r#"{"a": "string"}"#).unwrap();
    let mut fields = Fields::new(&root).unwrap();
    assert!(fields.optional::<i64>("a").is_err());

    // Non-map root.
    assert!(Fields::new(&crate::parse("[1]").unwrap()).is_err());
}

#[test]
fn write_primitives() {
    assert_eq!(true.to_value().to_string(), "true");
    assert_eq!(42_i32.to_value().to_string(), "42");
    assert_eq!((-7_i64).to_value().to_string(), "-7");
    assert_eq!(2.5_f64.to_value().to_string(), "2.5");
    assert_eq!("text".to_owned().to_value().to_string(), r#""text""#);

    // Non-finite floats have no JSON form.
    assert!(f64::NAN.to_value().is_null());
    assert!(f64::INFINITY.to_value().is_null());
}

#[test]
fn write_containers() {
    let val = vec![1_i64, 2, 3].to_value();
    assert_eq!(val.to_string(), "[1,2,3]");

    let val = Vec::<i64>::new().to_value();
    assert_eq!(val.to_string(), "[]");

    assert_eq!(Some(5_i64).to_value().to_string(), "5");
    assert_eq!(None::<i64>.to_value().to_string(), "null");

    let mut map = foldhash::HashMap::default();
    map.insert("x".to_owned(), 1_i64);
    let val = map.to_value();
    assert_eq!(val.to_string(), r#"{"x":1}"#);
}

#[test]
fn round_trips_through_text() {
    let mut map = foldhash::HashMap::default();
    map.insert("alpha".to_owned(), vec![1_i64, 2]);
    map.insert("beta".to_owned(), vec![]);

    let rendered = map.to_value().to_string();
    let back: foldhash::HashMap<String, Vec<i64>> = read(&rendered).unwrap();
    assert_eq!(back, map);
}

#[test]
fn parse_str_helper() {
    use std::net::Ipv4Addr;

    let root = crate::parse(r#""127.0.0.1""#).unwrap();
    let ip: Ipv4Addr = parse_str(&root).unwrap();
    assert_eq!(ip, Ipv4Addr::new(127, 0, 0, 1));

    let root = crate::parse(r#""not an address""#).unwrap();
    let err = parse_str::<Ipv4Addr, _>(&root).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Custom(..)));

    let root = crate::parse("[1]").unwrap();
    let err = parse_str::<Ipv4Addr, _>(&root).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}
