use std::io::{ self, Write };
use crate::models::chat::ChatMessage;
use crate::view::format::{ format_for_display, DisplayContent };
use super::render::{ write_line, Line, Span, SpanStyle };

/// Writes an assistant reply for non-interactive use, styled only when `colored`.
pub fn print_answer<W: Write>(out: &mut W, message: &ChatMessage, colored: bool) -> io::Result<()> {
    let mut lines: Vec<Line> = Vec::new();
    let mut push = |text: &str, style: SpanStyle| {
        for row in text.split('\n') {
            lines.push(Line { spans: vec![Span { text: row.to_string(), style }] });
        }
    };

    match format_for_display(&message.content) {
        DisplayContent::Plain(text) => push(text, SpanStyle::AssistantText),
        DisplayContent::Highlighted { before, heading, after } => {
            if !before.trim().is_empty() {
                push(before.trim_end(), SpanStyle::AssistantText);
            }
            push(&heading, SpanStyle::RacHeading);
            if !after.is_empty() {
                push(after, SpanStyle::RacBody);
            }
        }
    }

    for line in &lines {
        if colored {
            write_line(out, line)?;
        } else {
            write!(out, "{}", line.text())?;
        }
        writeln!(out)?;
    }
    out.flush()
}
