//! Crossterm-backed input and output for [`run_session`](crate::runner::run_session).

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{terminal, ExecutableCommand};
use log::{debug, warn};

use crate::input::{should_quit, KeyStateTracker};
use crate::runner::{InputSource, RenderSink};
use crate::term::{FrameBuffer, TerminalRenderer, Viewport};
use crate::types::InputSignals;

/// Keyboard state from terminal key events.
pub struct TerminalInput {
    keys: KeyStateTracker,
    quit: bool,
}

impl TerminalInput {
    pub fn new(keys: KeyStateTracker) -> Self {
        Self { keys, quit: false }
    }

    fn handle(&mut self, ev: Event, now: Instant) {
        if let Event::Key(key) = ev {
            if key.kind == KeyEventKind::Press && should_quit(key) {
                self.quit = true;
                return;
            }
            self.keys.handle_key_event(key, now);
        }
    }
}

impl InputSource for TerminalInput {
    /// Drains pending events without blocking, then reports held keys.
    fn sample(&mut self) -> Result<InputSignals> {
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.handle(ev, Instant::now());
        }
        Ok(self.keys.signals(Instant::now()))
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Owns the terminal for the lifetime of a game.
pub struct TerminalScreen {
    renderer: TerminalRenderer,
    release_events: bool,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            release_events: false,
        }
    }

    /// Take over the terminal. Asks for key release events where the
    /// terminal supports them; returns whether it does.
    pub fn enter(&mut self) -> Result<bool> {
        self.renderer.enter()?;
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            io::stdout().execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        debug!("key release events: {}", self.release_events);
        Ok(self.release_events)
    }

    /// Give the terminal back.
    pub fn exit(&mut self) -> Result<()> {
        if self.release_events {
            if let Err(e) = io::stdout().execute(PopKeyboardEnhancementFlags) {
                warn!("failed to restore keyboard flags: {}", e);
            }
        }
        self.renderer.exit()
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for TerminalScreen {
    fn viewport(&self) -> Viewport {
        self.renderer
            .viewport()
            .unwrap_or_else(|_| Viewport::new(80, 24))
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.renderer.draw(frame)
    }
}
