//! `{{name}}` placeholder parser.
//!
//! Matching is the non-greedy `{{(.*?)}}` scan card templates are authored
//! against: the name is everything up to the *first* following `}}`, taken
//! verbatim (no trimming, may be empty), and may not span a line break.
//! There is no escape for a literal `{{`.

/// A parsed segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text to emit verbatim.
    Lit(&'a str),
    /// Placeholder name (contents between `{{` and `}}`).
    Var(&'a str),
}

impl Segment<'_> {
    /// Length of the source text this segment was parsed from.
    pub fn source_len(&self) -> usize {
        match self {
            Segment::Lit(t) => t.len(),
            Segment::Var(k) => k.len() + 4,
        }
    }
}

/// Parse a template string into a sequence of [`Segment`]s.
///
/// Returns borrowed slices into `input`. Adjacent literal text is merged
/// into one segment, and empty literals are never emitted.
pub fn parse(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut lit_start = 0;
    let mut cursor = 0;
    // Absolute position of the first `}}` after the last opener tried, and
    // of the last line terminator between that opener and it.
    let mut closer: Option<(usize, Option<usize>)> = None;

    while let Some(rel) = input[cursor..].find("{{") {
        let open = cursor + rel;
        let start = open + 2;

        // A later opener that starts before the known `}}` closes on it too.
        let (close, last_break) = match closer {
            Some(c) if c.0 >= start => c,
            _ => {
                // No `}}` after this opener means none after any later opener either.
                let Some(rel) = input[start..].find("}}") else {
                    break;
                };
                let close = start + rel;
                let last_break = input[start..close]
                    .rfind(is_line_terminator)
                    .map(|i| start + i);
                (close, last_break)
            }
        };
        closer = Some((close, last_break));

        if let Some(brk) = last_break.filter(|&b| b >= start) {
            // Every opener before the break would span it; resume after it.
            cursor = brk;
            continue;
        }

        if open > lit_start {
            segments.push(Segment::Lit(&input[lit_start..open]));
        }
        segments.push(Segment::Var(&input[start..close]));

        cursor = close + 2;
        lit_start = cursor;
    }

    if lit_start < input.len() {
        segments.push(Segment::Lit(&input[lit_start..]));
    }

    segments
}

/// Ordered placeholder names of `template`, duplicates included.
///
/// The position of a name in this list is what binds it to a record field
/// under positional binding, so the list is returned exactly as scanned.
pub fn extract_placeholders(template: &str) -> Vec<&str> {
    parse(template)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Var(k) => Some(k),
            Segment::Lit(_) => None,
        })
        .collect()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(segs: &[Segment<'_>], vars: &[(&str, &str)]) -> String {
        let map: std::collections::HashMap<_, _> = vars.iter().copied().collect();
        segs.iter()
            .map(|s| match s {
                Segment::Lit(t) => *t,
                Segment::Var(k) => map.get(k).copied().unwrap_or("MISSING"),
            })
            .collect()
    }

    #[test]
    fn no_markers_yields_no_placeholders() {
        assert!(extract_placeholders("plain text { } }} {").is_empty());
        assert!(extract_placeholders("").is_empty());
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        assert_eq!(
            extract_placeholders("{{a}} {{b}} {{a}}"),
            vec!["a", "b", "a"]
        );
    }

    #[test]
    fn names_are_not_trimmed_or_validated() {
        assert_eq!(extract_placeholders("{{ Front }}{{}}"), vec![" Front ", ""]);
    }

    #[test]
    fn match_is_non_greedy() {
        assert_eq!(extract_placeholders("{{a}}}}{{b}}"), vec!["a", "b"]);
        assert_eq!(extract_placeholders("{{{a}}}"), vec!["{a"]);
    }

    #[test]
    fn unclosed_brace_is_literal() {
        let segs = parse("oops {{ unclosed");
        assert_eq!(segs, vec![Segment::Lit("oops {{ unclosed")]);
    }

    #[test]
    fn name_cannot_span_a_line_break() {
        assert_eq!(extract_placeholders("{{a\nb}}"), Vec::<&str>::new());
        assert_eq!(extract_placeholders("{{a\n{{b}}"), vec!["b"]);
        assert_eq!(
            parse("{{a\n{{b}}"),
            vec![Segment::Lit("{{a\n"), Segment::Var("b")]
        );
    }

    #[test]
    fn openers_before_a_line_break_are_skipped() {
        assert_eq!(extract_placeholders("{{x{{y\n{{z}}"), vec!["z"]);
        assert_eq!(extract_placeholders("{{a}}{{b\n}}{{c}}"), vec!["a", "c"]);
        assert_eq!(extract_placeholders("{{p\r\n{{q}} {{r}}"), vec!["q", "r"]);
    }

    #[test]
    fn long_run_of_openers_across_a_line_break() {
        let input = format!("{}\n}}}}", "{{".repeat(50_000));
        assert_eq!(parse(&input), vec![Segment::Lit(input.as_str())]);

        let input = format!("{}\n{{{{last}}}}", "{{".repeat(50_000));
        assert_eq!(extract_placeholders(&input), vec!["last"]);
    }

    #[test]
    fn literals_around_vars_round_trip() {
        let segs = parse("<b>{{Front}}</b> / {{Back}}!");
        assert_eq!(
            rebuild(&segs, &[("Front", "dog"), ("Back", "chien")]),
            "<b>dog</b> / chien!"
        );
        let total: usize = segs.iter().map(Segment::source_len).sum();
        assert_eq!(total, "<b>{{Front}}</b> / {{Back}}!".len());
    }

    #[test]
    fn multibyte_text_is_sliced_on_boundaries() {
        assert_eq!(extract_placeholders("단어 {{뜻}} ─"), vec!["뜻"]);
    }
}
