#![no_main]

use arbitrary::Arbitrary;
use ffgraph_core::{escape, unescape};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct EscapeInput {
    text: String,
}

fuzz_target!(|input: EscapeInput| {
    // Escape then unescape must be the identity.
    let escaped = escape(&input.text);
    assert_eq!(unescape(&escaped).unwrap(), input.text);

    // Unescaping arbitrary input must never panic.
    let _ = unescape(&input.text);
});
