use once_cell::sync::Lazy;
use regex::Regex;

static RAC_CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Según el artículo (\d+) del RAC-(\d+)").expect("RAC citation pattern is valid")
});

/// How an assistant message is laid out on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent<'a> {
    Plain(&'a str),
    /// A RAC article citation split out of the text so it can be styled as a heading.
    Highlighted {
        before: &'a str,
        heading: String,
        after: &'a str,
    },
}

impl<'a> DisplayContent<'a> {
    pub fn heading(&self) -> Option<&str> {
        match self {
            DisplayContent::Plain(_) => None,
            DisplayContent::Highlighted { heading, .. } => Some(heading),
        }
    }
}

/// Splits out the first RAC citation. Article and RAC numbers are taken from that
/// match's own captures, so they are always present whatever the case of the phrase.
pub fn format_for_display(content: &str) -> DisplayContent<'_> {
    let Some(caps) = RAC_CITATION.captures(content) else {
        return DisplayContent::Plain(content);
    };
    let Some(phrase) = caps.get(0) else {
        return DisplayContent::Plain(content);
    };

    let article = caps.get(1).map_or("", |m| m.as_str());
    let rac = caps.get(2).map_or("", |m| m.as_str());

    // The heading carries its own colon.
    let after = content[phrase.end()..]
        .strip_prefix(':')
        .unwrap_or(&content[phrase.end()..])
        .trim_start();

    DisplayContent::Highlighted {
        before: &content[..phrase.start()],
        heading: format!("Según el artículo {} del RAC-{}:", article, rac),
        after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_citation_into_heading_and_body() {
        let shown = format_for_display("Según el artículo 5 del RAC-2: el motor debe...");
        assert_eq!(
            shown,
            DisplayContent::Highlighted {
                before: "",
                heading: "Según el artículo 5 del RAC-2:".to_string(),
                after: "el motor debe...",
            }
        );
    }

    #[test]
    fn plain_text_is_returned_verbatim() {
        let shown = format_for_display("Hola, ¿cómo estás?");
        assert_eq!(shown, DisplayContent::Plain("Hola, ¿cómo estás?"));
        assert_eq!(shown.heading(), None);
    }

    #[test]
    fn keeps_text_preceding_the_citation() {
        let shown = format_for_display("Respuesta:\nSegún el artículo 12 del RAC-61 los pilotos...");
        match shown {
            DisplayContent::Highlighted { before, heading, after } => {
                assert_eq!(before, "Respuesta:\n");
                assert_eq!(heading, "Según el artículo 12 del RAC-61:");
                assert_eq!(after, "los pilotos...");
            }
            other => panic!("expected highlighted content, got {:?}", other),
        }
    }

    #[test]
    fn match_is_case_insensitive() {
        let shown = format_for_display("SEGÚN EL ARTÍCULO 7 DEL rac-91, se prohíbe...");
        assert_eq!(shown.heading(), Some("Según el artículo 7 del RAC-91:"));
        if let DisplayContent::Highlighted { after, .. } = shown {
            assert_eq!(after, ", se prohíbe...");
        }
    }

    #[test]
    fn numbers_come_from_the_matched_phrase() {
        let shown = format_for_display("Ver RAC-99, artículo 12. Según el artículo 3 del RAC-2: aplica.");
        assert_eq!(shown.heading(), Some("Según el artículo 3 del RAC-2:"));
    }

    #[test]
    fn only_first_citation_is_highlighted() {
        let text = "Según el artículo 1 del RAC-1: ver también Según el artículo 2 del RAC-2.";
        match format_for_display(text) {
            DisplayContent::Highlighted { heading, after, .. } => {
                assert_eq!(heading, "Según el artículo 1 del RAC-1:");
                assert_eq!(after, "ver también Según el artículo 2 del RAC-2.");
            }
            other => panic!("expected highlighted content, got {:?}", other),
        }
    }

    #[test]
    fn incomplete_citation_is_not_highlighted() {
        let shown = format_for_display("Según el artículo del RAC-2");
        assert_eq!(shown, DisplayContent::Plain("Según el artículo del RAC-2"));
    }
}
