//! Record + templates → the two faces of a flashcard.

use crate::{
    record::Record,
    schema::FieldMap,
    template::{Bindings, extract_placeholders, markup, render_segments},
};
use log::debug;

/// One rendered side of a card.
///
/// Holds one entry per `|`-separated alternate of the template; displays
/// show the first unless told otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    segments: Vec<String>,
}

impl Face {
    fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn text(&self) -> &str {
        self.segment(0).unwrap_or_default()
    }

    pub fn segment(&self, i: usize) -> Option<&str> {
        self.segments.get(i).map(String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub front: Face,
    pub back: Face,
    /// Placeholder names with no field to bind, sorted and deduplicated.
    pub missing: Vec<String>,
}

impl RenderedCard {
    pub fn front_text(&self) -> &str {
        self.front.text()
    }

    pub fn back_text(&self) -> &str {
        self.back.text()
    }
}

/// Build bindings for every placeholder of `template` from `fields`.
///
/// A name that occurs more than once ends up bound to the field of its last
/// occurrence.
pub fn bindings_for(template: &str, fields: &[&str], map: &FieldMap) -> Bindings {
    let mut bindings = Bindings::new();
    for (position, name) in extract_placeholders(template).into_iter().enumerate() {
        match map.index_of(position, name).and_then(|i| fields.get(i)) {
            Some(value) => bindings.bind(name, *value),
            None => bindings.bind_missing(name),
        }
    }
    bindings
}

/// Render both faces of `record`. Pure: identical input, identical card.
pub fn bind_card(record: &Record, map: &FieldMap) -> RenderedCard {
    let fields = record.fields();

    let q = bindings_for(&record.question_template, &fields, map);
    let a = bindings_for(&record.answer_template, &fields, map);

    let front = render_segments(&record.question_template, &q);
    let back = render_segments(&record.answer_template, &a)
        .iter()
        .map(|s| markup::normalize(s))
        .collect();

    let mut missing: Vec<String> = q
        .missing()
        .into_iter()
        .chain(a.missing())
        .map(str::to_owned)
        .collect();
    missing.sort_unstable();
    missing.dedup();

    debug!(
        "bound card: {} fields, {} question / {} answer bindings, {} missing",
        fields.len(),
        q.len(),
        a.len(),
        missing.len()
    );

    RenderedCard {
        front: Face::new(front),
        back: Face::new(back),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn card(fields: &str, q: &str, a: &str) -> RenderedCard {
        bind_card(&Record::new(fields, q, a), &FieldMap::Positional)
    }

    #[test]
    fn positional_round_trip() {
        let c = card("dog\x1fchien", "{{f0}}", "{{f1}}");
        assert_eq!(c.front_text(), "dog");
        assert_eq!(c.back_text(), "chien");
        assert!(c.missing.is_empty());
    }

    #[test]
    fn binding_follows_placeholder_order_not_name() {
        // The answer's first placeholder takes field 0 regardless of its name.
        let c = card("dog\x1fchien", "{{Front}}", "{{Back}}");
        assert_eq!(c.back_text(), "dog");
    }

    #[test]
    fn answer_repeating_the_front() {
        let c = card(
            "dog\x1fchien\x1fthe dog sleeps",
            "{{Front}}",
            "{{Front}}<hr id=answer>{{Back}}<br>{{Example}}",
        );
        // `<hr id=answer>` is not a bare rule and is kept as markup.
        assert_eq!(
            c.back_text(),
            "dog<hr id=answer>chien\nthe dog sleeps"
        );
    }

    #[test]
    fn back_markup_is_normalized() {
        let c = card("line1\x1fline2\x1fline3", "", "{{a}}<br>{{b}}<hr/>{{c}}");
        assert_eq!(c.back_text(), "line1\nline2\n───────────────\nline3");
    }

    #[test]
    fn front_markup_is_kept() {
        let c = card("a", "{{x}}<br>", "");
        assert_eq!(c.front_text(), "a<br>");
    }

    #[test]
    fn duplicate_name_takes_last_index() {
        let c = card("x\x1fy\x1fz", "{{a}} {{b}} {{a}}", "");
        assert_eq!(c.front_text(), "z y z");
    }

    #[test]
    fn short_record_reports_missing_fields() {
        let c = card("only", "{{Front}}", "{{Front}} / {{Back}} / {{Extra}}");
        assert_eq!(c.back_text(), "only /  / ");
        assert_eq!(c.missing, vec!["Back".to_owned(), "Extra".to_owned()]);
        assert!(!c.back_text().contains("undefined"));
    }

    #[test]
    fn multi_segment_templates_keep_alternates() {
        let c = card("dog\x1fchien", "{{a}}|{{b}}", "{{a}}");
        assert_eq!(c.front.segments(), ["dog".to_owned(), "chien".to_owned()]);
        assert_eq!(c.front.segment(1), Some("chien"));
        assert_eq!(c.front.segment(2), None);
        assert_eq!(c.front_text(), "dog");
    }

    #[test]
    fn named_schema_binds_by_name() {
        let map = FieldMap::Named(HashMap::from([
            ("Front".to_owned(), 0),
            ("Back".to_owned(), 1),
        ]));
        let rec = Record::new("dog\x1fchien", "{{Front}}", "{{Back}} ({{Front}}) {{Nope}}");
        let c = bind_card(&rec, &map);
        assert_eq!(c.front_text(), "dog");
        assert_eq!(c.back_text(), "chien (dog) ");
        assert_eq!(c.missing, vec!["Nope".to_owned()]);
    }

    #[test]
    fn binding_is_idempotent() {
        let rec = Record::new("a\x1fb", "{{x}}|{{y}}", "{{x}}<br>{{y}}");
        assert_eq!(
            bind_card(&rec, &FieldMap::Positional),
            bind_card(&rec, &FieldMap::Positional)
        );
    }
}
