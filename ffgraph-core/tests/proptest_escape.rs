//! Property-based tests for filtergraph escaping.
//!
//! Uses proptest to verify that escaping then unescaping any string,
//! including ones saturated with metacharacters, is the identity.

use ffgraph_core::{escape, unescape, Args, Param, Value};
use proptest::prelude::*;

proptest! {
    /// Escape then unescape is the identity for arbitrary strings.
    #[test]
    fn roundtrip_arbitrary(s in ".*") {
        prop_assert_eq!(unescape(&escape(&s)).unwrap(), s);
    }

    /// The same holds for strings built only from the metacharacter set.
    #[test]
    fn roundtrip_metacharacters(s in r"[\\':,;\[\]=]{0,64}") {
        prop_assert_eq!(unescape(&escape(&s)).unwrap(), s);
    }

    /// Escaped output never contains an unescaped metacharacter: every
    /// occurrence of one is preceded by an odd run of backslashes.
    #[test]
    fn escaped_output_has_no_bare_metacharacters(s in ".*") {
        let escaped = escape(&s);
        let chars: Vec<char> = escaped.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if [':', '\'', ',', ';', '[', ']', '='].contains(c) {
                let backslashes = chars[..i]
                    .iter()
                    .rev()
                    .take_while(|&&b| b == '\\')
                    .count();
                prop_assert_eq!(backslashes % 2, 1);
            }
        }
    }

    /// Rendering a string option escapes it exactly like `escape`.
    #[test]
    fn rendered_string_values_match_escape(s in ".*") {
        let mut args = Args::new();
        args.insert("text", Param::Explicit(Value::Str(s.clone())));
        prop_assert_eq!(args.render(), format!("text={}", escape(&s)));
    }

    /// Unescape never panics on arbitrary input.
    #[test]
    fn unescape_total(s in ".*") {
        let _ = unescape(&s);
    }
}
