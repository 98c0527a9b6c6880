pub mod keys;
pub mod renderer;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

pub use keys::{input_command, is_interrupt};
pub use renderer::{draw_scene, TerminalSprites};

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode, alternate-screen session. The terminal is restored on drop.
///
/// Where the terminal supports it, key event types are requested so that
/// auto-repeat arrives as `Repeat` and releases are reported. Other terminals
/// send every repeat as a fresh press.
pub struct Tui {
    active: bool,
    keyboard_enhanced: bool,
}

impl Tui {
    pub fn new() -> Self {
        Self {
            active: false,
            keyboard_enhanced: false,
        }
    }

    /// A terminal drawing to stdout, for [`TerminalSprites`].
    pub fn terminal() -> Result<CrosstermTerminal> {
        Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
    }

    pub fn init(&mut self) -> Result<()> {
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        enable_raw_mode()?;
        self.active = true;

        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.keyboard_enhanced = true;
        }
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.keyboard_enhanced {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        self.active = false;
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when the terminal reports repeats and releases as their own events.
    #[must_use]
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Default for Tui {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.is_active() {
            let _ = self.restore();
        }
    }
}
