use super::*;

#[test]
fn display_all_error_kinds() {
    let cases: Vec<(ErrorKind, &str)> = vec![
        (ErrorKind::UnexpectedEof, "unexpected-eof"),
        (ErrorKind::Unexpected('!'), "unexpected"),
        (
            ErrorKind::Wanted {
                expected: "a value",
                found: "a right brace",
            },
            "wanted",
        ),
        (ErrorKind::UnterminatedString, "unterminated-string"),
        (ErrorKind::InvalidEscape('z'), "invalid-escape"),
        (ErrorKind::InvalidHexEscape('G'), "invalid-hex-escape"),
        (ErrorKind::UnsupportedUnicode(0xd800), "unsupported-unicode"),
        (ErrorKind::TrailingData, "trailing-data"),
        (
            ErrorKind::TypeMismatch {
                expected: "map",
                found: "list",
            },
            "type-mismatch",
        ),
        (ErrorKind::KeyNotFound("k".into()), "key-not-found"),
        (
            ErrorKind::IndexOutOfBounds { index: 4, len: 2 },
            "index-out-of-bounds",
        ),
        (ErrorKind::Logic("msg"), "logic"),
        (ErrorKind::InvalidNumber, "invalid-number"),
        (ErrorKind::OutOfRange("i8"), "out-of-range"),
        (ErrorKind::MissingField("name"), "missing-field"),
        (
            ErrorKind::UnexpectedKeys {
                keys: vec!["k".into()],
            },
            "unexpected-keys",
        ),
        (ErrorKind::Custom("msg".into()), "custom"),
    ];

    for (kind, expected) in &cases {
        assert_eq!(
            format!("{kind}"),
            *expected,
            "Display mismatch for {expected}"
        );
    }
}

#[test]
fn error_display_all_variants() {
    let span = Span::new(0, 1);
    let cases: Vec<(Error, &str)> = vec![
        (
            Error::from((ErrorKind::UnexpectedEof, span)),
            "unexpected eof encountered",
        ),
        (
            Error::from((ErrorKind::Unexpected('!'), span)),
            "unexpected character found: `!`",
        ),
        (
            // Control characters print escaped.
            Error::from((ErrorKind::Unexpected('\t'), span)),
            "unexpected character found: `\\t`",
        ),
        (
            Error::from((
                ErrorKind::Wanted {
                    expected: "a comma or a right bracket",
                    found: "eof",
                },
                span,
            )),
            "expected a comma or a right bracket, found eof",
        ),
        (
            Error::from((ErrorKind::UnterminatedString, span)),
            "unterminated string",
        ),
        (
            Error::from((ErrorKind::InvalidEscape('z'), span)),
            "invalid escape character in string: `z`",
        ),
        (
            Error::from((ErrorKind::InvalidEscape('\t'), span)),
            "invalid escape character in string: `\\t`",
        ),
        (
            Error::from((ErrorKind::InvalidHexEscape('G'), span)),
            "invalid hex escape character in string: `G`",
        ),
        (
            Error::from((ErrorKind::UnsupportedUnicode(0xd800), span)),
            "unsupported unicode escape value: `55296`",
        ),
        (
            Error::from((ErrorKind::TrailingData, span)),
            "extra data at end of parsed input",
        ),
        (
            Error::from((
                ErrorKind::TypeMismatch {
                    expected: "map",
                    found: "list",
                },
                span,
            )),
            "expecting map but list was found",
        ),
        (
            Error::from((ErrorKind::KeyNotFound("host".into()), span)),
            "key not found: `host`",
        ),
        (
            Error::from((ErrorKind::IndexOutOfBounds { index: 4, len: 2 }, span)),
            "index 4 is out of bounds for a list of length 2",
        ),
        (
            Error::from((ErrorKind::Logic("cannot advance a null-backed iterator"), span)),
            "cannot advance a null-backed iterator",
        ),
        (
            Error::from((ErrorKind::InvalidNumber, span)),
            "invalid number",
        ),
        (
            Error::from((ErrorKind::OutOfRange("i8"), span)),
            "out of range of 'i8'",
        ),
        (
            Error::from((ErrorKind::MissingField("name"), span)),
            "missing field 'name' in map",
        ),
        (
            Error::from((
                ErrorKind::UnexpectedKeys {
                    keys: vec!["only".into()],
                },
                span,
            )),
            "unexpected keys in map: [\"only\"]",
        ),
        (
            Error::from((
                ErrorKind::UnexpectedKeys {
                    keys: vec!["a".into(), "b".into()],
                },
                span,
            )),
            "unexpected keys in map: [\"a\", \"b\"]",
        ),
        (
            Error::from((ErrorKind::Custom("custom message".into()), span)),
            "custom message",
        ),
    ];

    for (error, expected) in &cases {
        assert_eq!(format!("{error}"), *expected, "mismatch for {expected}");
    }
}

#[test]
fn error_construction_and_debug() {
    // From a bare kind: empty span, no line info.
    let error = Error::from(ErrorKind::InvalidNumber);
    assert!(error.span.is_empty());
    assert!(error.line_info.is_none());

    // From a kind with a span.
    let error = Error::from((ErrorKind::UnexpectedEof, Span::new(3, 4)));
    assert_eq!(error.span, Span::new(3, 4));

    let debug = format!("{error:?}");
    assert!(debug.contains("Error"));
    assert!(debug.contains("kind"));
    assert!(debug.contains("span"));

    // ErrorKind Debug delegates to Display and prints the discriminant name.
    let kind = ErrorKind::Custom("test".into());
    assert_eq!(format!("{kind:?}"), "custom");

    let kind = ErrorKind::TypeMismatch {
        expected: "string",
        found: "map",
    };
    assert_eq!(format!("{kind:?}"), "type-mismatch");

    // Errors satisfy std::error::Error.
    fn takes_std_error(_: &dyn std::error::Error) {}
    takes_std_error(&Error::from(ErrorKind::TrailingData));
}
