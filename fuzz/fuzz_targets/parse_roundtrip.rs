#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(value) = json_strand::parse(text) else {
        return;
    };

    // Whatever parses must render to text that parses back to an equal
    // tree. Key order is not part of the contract; map equality is
    // order-independent.
    let rendered = value.to_string();
    match json_strand::parse(&rendered) {
        Ok(reparsed) => assert!(
            reparsed == value,
            "reparsed tree differs!\ninput:\n{text}\nrendered:\n{rendered}"
        ),
        Err(err) => panic!(
            "rendering failed to reparse: {err}\ninput:\n{text}\nrendered:\n{rendered}"
        ),
    }
});
