//! Filtergraph string escaping.
//!
//! ffmpeg's filtergraph mini-language reserves a handful of metacharacters:
//! `:` separates options, `,` and `;` separate filters and chains, `[` and
//! `]` delimit pad labels, `=` splits `key=value`, and `'` and `\` drive its
//! own quoting layer. A string option containing any of these must be
//! backslash-escaped so ffmpeg's parser reproduces the original value
//! exactly; an unescaped metacharacter silently shifts option or filter
//! boundaries.

use crate::error::{GraphError, Result};

/// Characters that must be backslash-escaped inside an option value.
const METACHARACTERS: &[char] = &['\\', '\'', ':', ',', ';', '[', ']', '='];

/// Whether `s` contains any filtergraph metacharacter.
pub fn needs_escaping(s: &str) -> bool {
    s.chars().any(|c| METACHARACTERS.contains(&c))
}

/// Backslash-escape every filtergraph metacharacter in `s`.
pub fn escape(s: &str) -> String {
    if !needs_escaping(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if METACHARACTERS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Reverse [`escape`]: strip one level of backslash escaping.
///
/// A backslash before any character yields that character, matching
/// ffmpeg's parser. A trailing lone backslash has no unambiguous reading
/// and is rejected.
pub fn unescape(s: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => {
                    return Err(GraphError::Escaping {
                        input: s.to_string(),
                        message: "trailing lone backslash".to_string(),
                    })
                }
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_pass_through() {
        assert!(!needs_escaping("640x480"));
        assert!(!needs_escaping(""));
        assert_eq!(escape("640x480"), "640x480");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(escape("a:b"), "a\\:b");
        assert_eq!(escape("it's"), "it\\'s");
        assert_eq!(escape("a,b;c"), "a\\,b\\;c");
        assert_eq!(escape("[x]=y"), "\\[x\\]\\=y");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn unescape_inverts_escape() {
        for s in ["", "plain", "a:b", "it's", "odd [mix]; of, = \\ chars"] {
            assert_eq!(unescape(&escape(s)).unwrap(), s);
        }
    }

    #[test]
    fn unescape_accepts_any_escaped_character() {
        assert_eq!(unescape("\\x").unwrap(), "x");
    }

    #[test]
    fn trailing_backslash_is_rejected() {
        assert!(matches!(
            unescape("abc\\"),
            Err(GraphError::Escaping { .. })
        ));
    }
}
