use crossterm::{
    cursor::Show,
    event::{
        DisableBracketedPaste,
        EnableBracketedPaste,
        KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{ self, EnterAlternateScreen, LeaveAlternateScreen },
};
use log::{ debug, warn };
use std::io::{ self, Stdout, Write };
use crate::view::ChatView;
use super::render;

/// Raw-mode alternate screen. Restores the terminal on drop.
pub struct Terminal<W: Write = Stdout> {
    out: W,
    keyboard_enhanced: bool,
    active: bool,
}

impl Terminal<Stdout> {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Any error past this point drops the guard, which leaves raw mode.
        let mut guard = Self::with_raw_mode(io::stdout());

        // Needed to tell Shift+Enter apart from Enter.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                guard.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            guard.keyboard_enhanced = true;
            debug!("kitty keyboard enhancement enabled");
        }

        guard.setup_screen()
    }

    pub fn draw(&mut self, view: &mut ChatView) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        render::draw(&mut self.out, view, width, height)
    }
}

impl<W: Write> Terminal<W> {
    /// Guard for a terminal already switched to raw mode.
    fn with_raw_mode(out: W) -> Self {
        Self { out, keyboard_enhanced: false, active: true }
    }

    fn setup_screen(mut self) -> io::Result<Self> {
        execute!(self.out, EnterAlternateScreen, EnableBracketedPaste)?;
        Ok(self)
    }

    /// Every restore step runs even if an earlier one fails; the first error is returned.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(self.out, DisableBracketedPaste, Show, LeaveAlternateScreen);
        if self.keyboard_enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let raw = terminal::disable_raw_mode();
        screen.and(raw)?;
        self.out.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{ Arc, Mutex };

    /// Rejects the first write, then records everything.
    struct FailsOnce {
        failed: bool,
        written: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for FailsOnce {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
            }
            self.written.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_screen_setup_still_restores_the_terminal() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let out = FailsOnce { failed: false, written: written.clone() };

        let result = Terminal::with_raw_mode(out).setup_screen();
        assert!(result.is_err());

        let restored = String::from_utf8(written.lock().unwrap().clone()).unwrap();
        assert!(restored.contains("\u{1b}[?1049l"), "no leave-alternate-screen in {:?}", restored);
        assert!(restored.contains("\u{1b}[?25h"));
    }

    #[test]
    fn exit_runs_once() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let out = FailsOnce { failed: true, written: written.clone() };

        let mut guard = Terminal::with_raw_mode(out);
        guard.exit().unwrap();
        let after_exit = written.lock().unwrap().len();
        drop(guard);
        assert_eq!(written.lock().unwrap().len(), after_exit);
    }
}
