//! Parameter values and the ordered argument map.
//!
//! Every recognized option of a filter call is held in an [`Args`] map as a
//! [`Param`]: either the filter's documented default (never rendered) or a
//! caller-supplied value (always rendered). Catch-all extra options are
//! overlaid on top in a second pass, always explicit and always winning,
//! which reproduces dict-union semantics with an ordered map.

use serde::{Deserialize, Serialize};

use crate::escape::escape;

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Integer option.
    Int(i64),
    /// Floating point option; renders in shortest round-trippable form.
    Float(f64),
    /// Boolean option; renders as `1`/`0`.
    Bool(bool),
    /// Free-form string option; metacharacters are escaped on render.
    Str(String),
    /// Enumerated literal. Rendered as its symbolic string, never as a
    /// backing integer. Legal value sets are catalog data owned by the
    /// filter layer, not validated here.
    Symbol(String),
}

impl Value {
    /// Render in the textual form ffmpeg's option parser expects.
    pub fn render(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            Value::Str(s) => escape(s),
            Value::Symbol(s) => escape(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// An option value tagged with whether the caller supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Param {
    /// The filter's documented default. Never rendered.
    Default(Value),
    /// A caller-supplied value. Always rendered.
    Explicit(Value),
}

impl Param {
    /// The wrapped value, regardless of tag.
    pub fn value(&self) -> &Value {
        match self {
            Param::Default(v) | Param::Explicit(v) => v,
        }
    }

    /// Whether the caller supplied this value.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Param::Explicit(_))
    }

    fn into_value(self) -> Value {
        match self {
            Param::Default(v) | Param::Explicit(v) => v,
        }
    }
}

/// Ordered option map with dict-union overwrite semantics.
///
/// Insertion order is preserved. Re-inserting an existing key replaces its
/// param in place, keeping the key's original position, so option rendering
/// is stable under overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Args {
    entries: Vec<(String, Param)>,
}

impl Args {
    /// Create an empty argument map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an option.
    pub fn insert(&mut self, key: impl Into<String>, param: Param) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = param,
            None => self.entries.push((key, param)),
        }
    }

    /// Apply a second map on top of this one. Every overlaid entry is forced
    /// to explicit and overwrites a same-named documented option.
    pub fn overlay(&mut self, extra: Args) {
        for (key, param) in extra.entries {
            self.insert(key, Param::Explicit(param.into_value()));
        }
    }

    /// Look up an option by name.
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
    }

    /// Iterate options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Number of options, defaulted or explicit.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no options at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the explicit options as `key=value` pairs joined by `:`.
    ///
    /// Returns an empty string when no option is explicit, in which case the
    /// node renders as a bare filter name.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, param) in &self.entries {
            if !param.is_explicit() {
                continue;
            }
            if !out.is_empty() {
                out.push(':');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(&param.value().render());
        }
        out
    }
}

impl FromIterator<(String, Param)> for Args {
    fn from_iter<T: IntoIterator<Item = (String, Param)>>(iter: T) -> Self {
        let mut args = Args::new();
        for (key, param) in iter {
            args.insert(key, param);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_rendering() {
        assert_eq!(Value::Int(-3).render(), "-3");
        assert_eq!(Value::Float(0.5).render(), "0.5");
        assert_eq!(Value::Float(2.0).render(), "2");
        assert_eq!(Value::Bool(true).render(), "1");
        assert_eq!(Value::Bool(false).render(), "0");
        assert_eq!(Value::Str("abc".into()).render(), "abc");
        assert_eq!(Value::Symbol("bicubic".into()).render(), "bicubic");
    }

    #[test]
    fn string_values_are_escaped() {
        assert_eq!(Value::Str("a:b".into()).render(), "a\\:b");
    }

    #[test]
    fn defaults_are_suppressed() {
        let mut args = Args::new();
        args.insert("w", Param::Default(Value::from("iw")));
        args.insert("h", Param::Explicit(Value::from("480")));
        assert_eq!(args.render(), "h=480");
    }

    #[test]
    fn all_defaults_render_empty() {
        let mut args = Args::new();
        args.insert("w", Param::Default(Value::from("iw")));
        assert_eq!(args.render(), "");
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut args = Args::new();
        args.insert("a", Param::Explicit(Value::Int(1)));
        args.insert("b", Param::Explicit(Value::Int(2)));
        args.insert("a", Param::Explicit(Value::Int(3)));
        assert_eq!(args.render(), "a=3:b=2");
    }

    #[test]
    fn overlay_forces_explicit_and_wins() {
        let mut args = Args::new();
        args.insert("w", Param::Default(Value::from("iw")));
        args.insert("h", Param::Explicit(Value::from("480")));

        let mut extra = Args::new();
        extra.insert("w", Param::Default(Value::from("320")));
        extra.insert("flags", Param::Explicit(Value::Symbol("lanczos".into())));
        args.overlay(extra);

        // The overlaid value renders even though it was tagged default.
        assert_eq!(args.render(), "w=320:h=480:flags=lanczos");
    }

    #[test]
    fn get_and_len() {
        let mut args = Args::new();
        args.insert("k", Param::Explicit(Value::Int(7)));
        assert!(args.get("k").unwrap().is_explicit());
        assert!(args.get("missing").is_none());
        assert_eq!(args.len(), 1);
        assert!(!args.is_empty());
    }
}
