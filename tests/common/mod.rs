#![allow(dead_code)]

use envfile_rs::{format, parse_str};

/// Byte-stable round trip: parse then format reproduces the input.
pub fn roundtrip(input: &str) {
    let doc = parse_str(input).expect("parse failed");
    let output = format(&doc);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Semantic idempotency: re-parsing the serialized form yields an
/// element-equal document, even when the bytes differ from the input.
pub fn idempotent(input: &str) {
    let first = parse_str(input).expect("parse failed");
    let formatted = format(&first);
    let second = parse_str(&formatted).unwrap_or_else(|e| {
        panic!("failed to re-parse formatted output: {e}\n--- formatted ---\n{formatted}")
    });

    assert_eq!(
        first.elements, second.elements,
        "semantic round-trip mismatch\n--- formatted ---\n{formatted}"
    );
}
