//! Turns a [`ChatView`] into styled terminal lines.
//!
//! Layout is computed as plain data first so it can be inspected without a
//! terminal; [`draw`] then writes it out with crossterm.

use crossterm::{
    cursor::{ Hide, MoveTo, Show },
    queue,
    style::{ Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor },
    terminal::{ Clear, ClearType },
};
use std::io::{ self, Write };
use textwrap::{ Options, WordSplitter };
use unicode_width::{ UnicodeWidthChar, UnicodeWidthStr };
use crate::models::chat::{ ChatMessage, Role };
use crate::view::format::{ format_for_display, DisplayContent };
use crate::view::ChatView;

pub const TITLE: &str = "Asistente EMI";
pub const WELCOME_TITLE: &str = "¡Bienvenido al Asistente EMI!";
pub const WELCOME_HINT: &str = "Escribe tu pregunta abajo para comenzar una conversación.";
pub const LOADING_TEXT: &str = "Procesando respuesta...";
pub const PLACEHOLDER: &str = "Escribe tu pregunta...";
const INPUT_PROMPT: &str = "› ";
const MAX_INPUT_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Title,
    Clock,
    Rule,
    Welcome,
    Muted,
    UserText,
    AssistantText,
    RacHeading,
    RacBody,
    Timestamp,
    Loading,
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self { text: text.into(), style }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn from_span(text: impl Into<String>, style: SpanStyle) -> Self {
        Self { spans: vec![Span::new(text, style)] }
    }

    fn blank() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    fn indented(mut self, by: usize) -> Self {
        if by > 0 {
            self.spans.insert(0, Span::new(" ".repeat(by), SpanStyle::Muted));
        }
        self
    }
}

/// Word wrap on terminal cells. Explicit newlines are preserved.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1)).word_splitter(WordSplitter::NoHyphenation);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|row| row.into_owned())
        .collect()
}

fn header(view: &ChatView, width: usize) -> Vec<Line> {
    let title = format!("● {}", TITLE);
    let clock = view.current_time().to_string();
    let gap = width
        .saturating_sub(title.width() + clock.width())
        .max(1);
    vec![
        Line {
            spans: vec![
                Span::new(title, SpanStyle::Title),
                Span::new(" ".repeat(gap), SpanStyle::Muted),
                Span::new(clock, SpanStyle::Clock),
            ],
        },
        Line::from_span("─".repeat(width), SpanStyle::Rule)
    ]
}

fn welcome(width: usize) -> Vec<Line> {
    let center = |text: &str, style: SpanStyle| {
        let pad = width.saturating_sub(text.width()) / 2;
        Line::from_span(text, style).indented(pad)
    };
    vec![
        Line::blank(),
        center(WELCOME_TITLE, SpanStyle::Welcome),
        center(WELCOME_HINT, SpanStyle::Muted)
    ]
}

fn bubble_width(width: usize) -> usize {
    (width * 4 / 5).max(10)
}

fn message_lines(message: &ChatMessage, width: usize) -> Vec<Line> {
    let inner = bubble_width(width).saturating_sub(2);
    let mut lines = Vec::new();

    match message.role {
        Role::User => {
            for row in wrap(&message.content, inner) {
                lines.push(Line::from_span(row, SpanStyle::UserText));
            }
        }
        Role::Assistant => {
            match format_for_display(&message.content) {
                DisplayContent::Plain(text) => {
                    for row in wrap(text, inner) {
                        lines.push(Line::from_span(row, SpanStyle::AssistantText));
                    }
                }
                DisplayContent::Highlighted { before, heading, after } => {
                    if !before.trim().is_empty() {
                        for row in wrap(before.trim_end(), inner) {
                            lines.push(Line::from_span(row, SpanStyle::AssistantText));
                        }
                    }
                    for row in wrap(&heading, inner) {
                        lines.push(Line::from_span(row, SpanStyle::RacHeading));
                    }
                    if !after.is_empty() {
                        for row in wrap(after, inner) {
                            lines.push(Line::from_span(row, SpanStyle::RacBody));
                        }
                    }
                }
            }
        }
    }
    lines.push(Line::from_span(message.timestamp.clone(), SpanStyle::Timestamp));

    // User bubbles sit on the right, assistant bubbles on the left.
    match message.role {
        Role::User => {
            lines
                .into_iter()
                .map(|line| {
                    let pad = width.saturating_sub(line.width() + 1);
                    line.indented(pad)
                })
                .collect()
        }
        Role::Assistant => lines.into_iter().map(|line| line.indented(1)).collect(),
    }
}

/// Every line of the scrollable history, oldest first.
pub fn history_lines(view: &ChatView, width: usize) -> Vec<Line> {
    let messages = view.conversation().messages();
    let mut lines = Vec::new();

    if messages.is_empty() && !view.is_loading() {
        return welcome(width);
    }
    for message in messages {
        lines.extend(message_lines(message, width));
        lines.push(Line::blank());
    }
    if view.is_loading() {
        lines.push(Line::from_span(format!(" ● ● ● {}", LOADING_TEXT), SpanStyle::Loading));
    }
    lines
}

/// Input rows hard-wrapped on terminal cells, with the cursor as (row, col).
fn wrap_input(input: &str, cursor: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0;
    let mut at = None;

    for (idx, c) in input.char_indices() {
        let cells = c.width().unwrap_or(0);
        if c != '\n' && col + cells > width {
            rows.push(String::new());
            col = 0;
        }
        if idx == cursor {
            at = Some((rows.len() - 1, col));
        }
        if c == '\n' {
            rows.push(String::new());
            col = 0;
            continue;
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        col += cells;
    }

    let at = at.unwrap_or_else(|| {
        if col >= width {
            rows.push(String::new());
            col = 0;
        }
        (rows.len() - 1, col)
    });
    (rows, at)
}

/// The visible part of the input box and the cursor position inside it.
pub struct InputArea {
    pub lines: Vec<Line>,
    pub cursor: (usize, usize),
}

pub fn input_area(view: &ChatView, width: usize) -> InputArea {
    let prompt_width = INPUT_PROMPT.width();
    if view.input().is_empty() {
        return InputArea {
            lines: vec![Line {
                spans: vec![
                    Span::new(INPUT_PROMPT, SpanStyle::Input),
                    Span::new(PLACEHOLDER, SpanStyle::Muted),
                ],
            }],
            cursor: (0, prompt_width),
        };
    }

    let (rows, (cursor_row, cursor_col)) = wrap_input(
        view.input(),
        view.cursor(),
        width.saturating_sub(prompt_width)
    );
    // Keep the cursor row inside the window.
    let start = (cursor_row + 1).saturating_sub(MAX_INPUT_ROWS);
    let end = (start + MAX_INPUT_ROWS).min(rows.len());

    let lines = rows[start..end]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let prefix = if start + i == 0 { INPUT_PROMPT } else { "  " };
            Line {
                spans: vec![
                    Span::new(prefix, SpanStyle::Input),
                    Span::new(row.clone(), SpanStyle::Input),
                ],
            }
        })
        .collect();

    InputArea {
        lines,
        cursor: (cursor_row - start, (prompt_width + cursor_col).min(width.saturating_sub(1))),
    }
}

/// Full screen for a terminal of `width` x `height`, plus the input cursor position.
pub struct Frame {
    pub lines: Vec<Line>,
    pub cursor: Option<(u16, u16)>,
}

pub fn layout(view: &mut ChatView, width: u16, height: u16) -> Frame {
    let width = width as usize;
    let height = height as usize;

    let header = header(view, width);
    let input = input_area(view, width);

    let body_height = height.saturating_sub(header.len() + 1 + input.lines.len());
    let history = history_lines(view, width);
    let max_offset = history.len().saturating_sub(body_height);
    view.clamp_scroll(max_offset);

    let end = history.len() - view.scroll_offset();
    let start = end.saturating_sub(body_height);

    let mut lines = header;
    lines.extend(history[start..end].iter().cloned());
    while lines.len() < height.saturating_sub(input.lines.len() + 1) {
        lines.push(Line::blank());
    }
    lines.push(Line::from_span("─".repeat(width), SpanStyle::Rule));
    let input_top = lines.len();
    let (row, col) = input.cursor;
    lines.extend(input.lines);

    let cursor = if view.is_focused() {
        Some((col as u16, (input_top + row) as u16))
    } else {
        None
    };

    Frame { lines, cursor }
}

fn color_for(style: SpanStyle) -> (Color, bool) {
    match style {
        SpanStyle::Title => (Color::Cyan, true),
        SpanStyle::Clock => (Color::Grey, false),
        SpanStyle::Rule => (Color::DarkMagenta, false),
        SpanStyle::Welcome => (Color::White, true),
        SpanStyle::Muted => (Color::DarkGrey, false),
        SpanStyle::UserText => (Color::Blue, false),
        SpanStyle::AssistantText => (Color::White, false),
        SpanStyle::RacHeading => (Color::Magenta, true),
        SpanStyle::RacBody => (Color::Cyan, false),
        SpanStyle::Timestamp => (Color::DarkGrey, false),
        SpanStyle::Loading => (Color::Cyan, false),
        SpanStyle::Input => (Color::White, false),
    }
}

pub fn write_line<W: Write>(out: &mut W, line: &Line) -> io::Result<()> {
    for span in &line.spans {
        let (color, bold) = color_for(span.style);
        queue!(out, SetForegroundColor(color))?;
        if bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(())
}

pub fn draw<W: Write>(out: &mut W, view: &mut ChatView, width: u16, height: u16) -> io::Result<()> {
    let frame = layout(view, width, height);

    queue!(out, Hide, MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in frame.lines.iter().enumerate().take(height as usize) {
        queue!(out, MoveTo(0, row as u16))?;
        write_line(out, line)?;
    }
    if let Some((col, row)) = frame.cursor {
        queue!(out, MoveTo(col, row), Show)?;
    }
    out.flush()
}
