//! Response key normalization (snake_case wire keys to lowerCamelCase).

use serde_json::Value;

/// Character class used for word splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Lower,
    Upper,
    Digit,
}

/// Classifies a character. Returns `None` for word separators.
fn kind_of(c: char) -> Option<CharKind> {
    if c.is_ascii_digit() {
        Some(CharKind::Digit)
    } else if c.is_uppercase() {
        Some(CharKind::Upper)
    } else if c.is_alphanumeric() {
        Some(CharKind::Lower)
    } else {
        None
    }
}

/// Moves the current word into `words` if it is non-empty.
fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Splits a key into words.
///
/// Boundaries are separators (anything not alphanumeric), lower-to-upper
/// transitions, letter/digit transitions, and the last capital of an
/// acronym that starts a new capitalized word (`HTMLParser` splits into
/// `HTML` and `Parser`).
fn split_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<CharKind> = None;

    for c in key.chars() {
        let Some(kind) = kind_of(c) else {
            flush(&mut words, &mut current);
            prev = None;
            continue;
        };

        match (prev, kind) {
            (Some(CharKind::Lower), CharKind::Upper)
            | (Some(CharKind::Lower | CharKind::Upper), CharKind::Digit)
            | (Some(CharKind::Digit), CharKind::Lower | CharKind::Upper) => {
                flush(&mut words, &mut current);
            }
            (Some(CharKind::Upper), CharKind::Lower) if current.chars().count() > 1 => {
                if let Some(last) = current.pop() {
                    flush(&mut words, &mut current);
                    current.push(last);
                }
            }
            _ => {}
        }

        current.push(c);
        prev = Some(kind);
    }
    flush(&mut words, &mut current);

    words
}

/// Converts a key to lowerCamelCase.
///
/// The first word is lowercased and every following word is capitalized.
/// Digit runs are kept as-is, so `iso_3166_1` becomes `iso31661`.
#[must_use]
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (index, word) in split_words(key).iter().enumerate() {
        let lower = word.to_lowercase();
        if index == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Rewrites every object key in `value` with `f`, at any depth.
///
/// Arrays are walked element by element; scalars are returned unchanged.
#[must_use]
pub fn deep_map_keys<F>(value: Value, f: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (f(&key), deep_map_keys(inner, f)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| deep_map_keys(item, f)).collect())
        }
        scalar => scalar,
    }
}

/// Rewrites every object key in `value` to lowerCamelCase.
#[must_use]
pub fn normalize_keys(value: Value) -> Value {
    deep_map_keys(value, &camel_case)
}
