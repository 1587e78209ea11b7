//! Placeholder substitution.

use super::parser::{Segment, parse};
use std::collections::HashMap;

/// Separates alternate templates inside one question/answer string.
pub const SEGMENT_SEPARATOR: char = '|';

/// Values bound to placeholder names for one render pass.
///
/// A name can be bound to text, or bound as *missing* when the record has
/// no field for it. Missing names render as empty text; names that are not
/// bound at all are left in the output untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, Option<String>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), Some(value.into()));
    }

    /// Bind `name` as a missing field, replacing any earlier binding.
    pub fn bind_missing(&mut self, name: impl Into<String>) {
        self.values.insert(name.into(), None);
    }

    /// `None` if unbound, `Some(None)` if bound as missing.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.values.get(name).map(Option::as_deref)
    }

    /// Names currently bound as missing, sorted.
    pub fn missing(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .values
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut b = Self::new();
        for (k, v) in iter {
            b.bind(k, v);
        }
        b
    }
}

/// Substitute every bound `{{name}}` in `template`.
///
/// Single pass over the parsed template: substituted values are never
/// rescanned, so a value containing `{{other}}` is emitted as-is.
pub fn render(template: &str, bindings: &Bindings) -> String {
    let segments = parse(template);

    let capacity: usize = segments
        .iter()
        .map(|s| match s {
            Segment::Var(k) => match bindings.get(k) {
                Some(v) => v.map_or(0, str::len),
                None => s.source_len(),
            },
            Segment::Lit(_) => s.source_len(),
        })
        .sum();

    let mut out = String::with_capacity(capacity);

    for seg in &segments {
        match seg {
            Segment::Lit(t) => out.push_str(t),
            Segment::Var(k) => match bindings.get(k) {
                Some(Some(v)) => out.push_str(v),
                Some(None) => {}
                None => {
                    out.push_str("{{");
                    out.push_str(k);
                    out.push_str("}}");
                }
            },
        }
    }

    out
}

/// Split `template` on [`SEGMENT_SEPARATOR`] and render each part on its own.
///
/// Always yields at least one segment.
pub fn render_segments(template: &str, bindings: &Bindings) -> Vec<String> {
    template
        .split(SEGMENT_SEPARATOR)
        .map(|part| render(part, bindings))
        .collect()
}
