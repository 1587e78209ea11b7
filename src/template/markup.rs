//! Card markup to display text.

use regex::Regex;
use std::sync::LazyLock;

/// Divider drawn in place of `<hr>`.
pub const DIVIDER: &str = "───────────────";

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("static regex"));

static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<hr\s*/?>").expect("static regex"));

/// Turn `<br>` variants into newlines, then `<hr>` variants into a divider
/// line. Any other markup is left alone.
pub fn normalize(text: &str) -> String {
    let text = LINE_BREAK.replace_all(text, "\n");
    RULE.replace_all(&text, format!("\n{DIVIDER}\n").as_str())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_and_rules() {
        assert_eq!(
            normalize("line1<br>line2<hr/>line3"),
            "line1\nline2\n───────────────\nline3"
        );
    }

    #[test]
    fn variants_are_case_insensitive() {
        assert_eq!(normalize("a<BR/>b<Br />c<br  >d"), "a\nb\nc\nd");
        assert_eq!(normalize("<HR>"), format!("\n{DIVIDER}\n"));
    }

    #[test]
    fn other_tags_survive() {
        assert_eq!(normalize("<b>bold</b><brx>"), "<b>bold</b><brx>");
    }
}
