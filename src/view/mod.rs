pub mod clock;
pub mod format;
pub mod input;

use crossterm::event::KeyEvent;
use log::{ debug, info };
use std::time::Duration;
use tokio::sync::mpsc;
use crate::client::{ ask_service, AnswerOutcome, AnswerService };
use crate::models::chat::{ ChatMessage, Conversation };
use self::clock::{ current_time, ClockTicker, TICK_INTERVAL };
use self::input::{ map_key_event, InputAction };

const PAGE_LINES: usize = 10;

/// A question accepted by the view and waiting to be sent to the answer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Ask(PendingQuestion),
    Exit,
    None,
}

/// State of the chat screen: the conversation plus the transient UI fields.
#[derive(Debug)]
pub struct ChatView {
    conversation: Conversation,
    input: String,
    cursor: usize,
    loading: bool,
    current_time: String,
    scroll_offset: usize,
    focused: bool,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            cursor: 0,
            loading: false,
            current_time: current_time(),
            scroll_offset: 0,
            focused: false,
        }
    }

    /// Focuses the input and starts the clock. Dropping the returned ticker stops it.
    pub fn mount(&mut self, clock_tx: mpsc::Sender<String>) -> ClockTicker {
        self.mount_with_period(TICK_INTERVAL, clock_tx)
    }

    pub fn mount_with_period(&mut self, period: Duration, clock_tx: mpsc::Sender<String>) -> ClockTicker {
        self.focused = true;
        self.current_time = current_time();
        ClockTicker::start(period, clock_tx)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn current_time(&self) -> &str {
        &self.current_time
    }

    pub fn set_current_time(&mut self, time: String) {
        self.current_time = time;
    }

    /// Lines scrolled up from the newest entry; 0 means pinned to the bottom.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor = self.input.len();
    }

    pub fn insert_str(&mut self, text: &str) {
        self.input.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn push(&mut self, message: ChatMessage) {
        self.conversation.push(message);
        self.scroll_to_bottom();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// First half of a submission: records the question and flips the loading flag.
    /// Returns `None` when the input is blank or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<PendingQuestion> {
        if !self.can_submit() {
            return None;
        }

        let question = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.push(ChatMessage::user(question.clone(), current_time()));
        self.loading = true;
        info!("Submitting question ({} messages in conversation)", self.conversation.len());

        Some(PendingQuestion { question })
    }

    /// Second half of a submission: appends the reply and always clears loading.
    pub fn complete_submit(&mut self, outcome: AnswerOutcome) {
        debug!("Request finished: {:?}", outcome);
        self.push(ChatMessage::assistant(outcome.into_content(), current_time()));
        self.loading = false;
    }

    /// Submits `text` and waits for the reply.
    pub async fn submit(&mut self, text: &str, service: &dyn AnswerService) {
        if self.loading {
            return;
        }
        self.set_input(text);
        let Some(pending) = self.begin_submit() else {
            return;
        };
        let outcome = ask_service(service, &pending.question).await;
        self.complete_submit(outcome);
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> ViewCommand {
        self.apply(map_key_event(event))
    }

    pub fn apply(&mut self, action: InputAction) -> ViewCommand {
        match action {
            InputAction::Submit => {
                return match self.begin_submit() {
                    Some(pending) => ViewCommand::Ask(pending),
                    None => ViewCommand::None,
                };
            }
            InputAction::Exit => {
                return ViewCommand::Exit;
            }
            InputAction::InsertNewline => self.insert_str("\n"),
            InputAction::InsertChar(c) => {
                self.input.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            InputAction::DeleteChar => {
                if let Some((idx, _)) = self.input[..self.cursor].char_indices().next_back() {
                    self.input.remove(idx);
                    self.cursor = idx;
                }
            }
            InputAction::DeleteForward => {
                if self.cursor < self.input.len() {
                    self.input.remove(self.cursor);
                }
            }
            InputAction::MoveCursorLeft => {
                if let Some((idx, _)) = self.input[..self.cursor].char_indices().next_back() {
                    self.cursor = idx;
                }
            }
            InputAction::MoveCursorRight => {
                if let Some(c) = self.input[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            InputAction::MoveCursorHome => {
                self.cursor = 0;
            }
            InputAction::MoveCursorEnd => {
                self.cursor = self.input.len();
            }
            InputAction::ScrollUp => self.scroll_up(1),
            InputAction::ScrollDown => self.scroll_down(1),
            InputAction::PageUp => self.scroll_up(PAGE_LINES),
            InputAction::PageDown => self.scroll_down(PAGE_LINES),
            InputAction::None => {}
        }
        ViewCommand::None
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Keeps the offset within the rendered history.
    pub fn clamp_scroll(&mut self, max_offset: usize) {
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
