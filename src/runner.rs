//! The real-time loop around a [`Session`].
//!
//! The session itself is pure and tick-driven. This module paces it at one
//! tick per [`TICK_MS`], samples input before every tick, presents a frame
//! after every tick and holds completed lines on screen for
//! [`LINE_FLASH_MS`] before collapsing them. Frames are composed here with a
//! [`GameView`]; input, output and time are behind traits so the loop runs
//! headless in tests.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};

use crate::core::{GameSnapshot, PieceSource, Session};
use crate::term::{FrameBuffer, GameView, Viewport};
use crate::types::{InputSignals, LINE_FLASH_MS, TICK_MS};

/// Key-down state, sampled once per tick.
pub trait InputSource {
    fn sample(&mut self) -> Result<InputSignals>;

    /// The player asked to leave.
    fn quit_requested(&self) -> bool {
        false
    }
}

/// Displays composed frames.
pub trait RenderSink {
    /// Size the next frame should be composed at.
    fn viewport(&self) -> Viewport;

    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;
}

/// Monotonic time plus the ability to wait.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub score: u32,
    pub pieces: u32,
    pub lines: u32,
    pub ticks: u64,
    /// Ended by the player rather than by a blocked spawn.
    pub quit: bool,
}

/// Reusable buffers for composing frames.
struct Frames {
    view: GameView,
    snap: GameSnapshot,
    fb: FrameBuffer,
}

impl Frames {
    fn show<P, R>(&mut self, session: &Session<P>, sink: &mut R) -> Result<()>
    where
        P: PieceSource,
        R: RenderSink + ?Sized,
    {
        session.snapshot_into(&mut self.snap);
        self.view.render_into(&self.snap, sink.viewport(), &mut self.fb);
        sink.present(&self.fb)
    }
}

/// Run `session` until game over or quit.
pub fn run_session<P, I, R, C>(
    session: &mut Session<P>,
    input: &mut I,
    sink: &mut R,
    clock: &mut C,
) -> Result<Outcome>
where
    P: PieceSource,
    I: InputSource + ?Sized,
    R: RenderSink + ?Sized,
    C: Clock + ?Sized,
{
    let tick = Duration::from_millis(TICK_MS as u64);
    let flash = Duration::from_millis(LINE_FLASH_MS as u64);
    let mut frames = Frames {
        view: GameView::default(),
        snap: GameSnapshot::default(),
        fb: FrameBuffer::new(0, 0),
    };

    session.start();
    frames.show(session, sink)?;

    let mut deadline = clock.now() + tick;
    let mut quit = false;

    while !session.is_game_over() {
        let now = clock.now();
        if deadline > now {
            clock.sleep(deadline - now);
        }
        // Never try to catch up on missed ticks; resync instead.
        let now = clock.now();
        deadline = if now > deadline + tick {
            now + tick
        } else {
            deadline + tick
        };

        let signals = input.sample()?;
        if input.quit_requested() {
            quit = true;
            break;
        }

        session.tick(signals);
        if let Some(event) = session.take_last_event() {
            debug!(
                "lock #{} {:?}: {} line(s), +{}, speed {}",
                event.pieces_locked,
                event.kind,
                event.rows.len(),
                event.score.total,
                event.speed
            );
        }

        frames.show(session, sink)?;

        if session.has_pending_lines() {
            clock.sleep(flash);
            session.finish_line_clear();
            frames.show(session, sink)?;
            deadline = clock.now() + tick;
        }
    }

    let outcome = Outcome {
        score: session.score(),
        pieces: session.pieces_locked(),
        lines: session.lines_cleared(),
        ticks: session.ticks(),
        quit,
    };
    info!(
        "session ended ({}): score {}, pieces {}, lines {}, ticks {}",
        if quit { "quit" } else { "game over" },
        outcome.score,
        outcome.pieces,
        outcome.lines,
        outcome.ticks
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, ScriptedPieces};
    use crate::types::PieceKind;

    struct Idle {
        samples: u32,
        quit_after: u32,
    }

    impl InputSource for Idle {
        fn sample(&mut self) -> Result<InputSignals> {
            self.samples += 1;
            Ok(InputSignals::NONE)
        }

        fn quit_requested(&self) -> bool {
            self.samples >= self.quit_after
        }
    }

    struct Count(u32);

    impl RenderSink for Count {
        fn viewport(&self) -> Viewport {
            Viewport::new(40, 20)
        }

        fn present(&mut self, _: &FrameBuffer) -> Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    struct Fake {
        now: Instant,
        slept: Vec<Duration>,
    }

    impl Clock for Fake {
        fn now(&self) -> Instant {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            self.now += duration;
            self.slept.push(duration);
        }
    }

    #[test]
    fn test_quit_stops_before_ticking() {
        let mut session = Session::with_source(Field::new(), ScriptedPieces::repeat(PieceKind::O));
        let mut input = Idle {
            samples: 0,
            quit_after: 3,
        };
        let mut sink = Count(0);
        let mut clock = Fake {
            now: Instant::now(),
            slept: Vec::new(),
        };

        let outcome = run_session(&mut session, &mut input, &mut sink, &mut clock).unwrap();
        assert!(outcome.quit);
        assert_eq!(outcome.ticks, 2);
        // Initial frame plus one per tick.
        assert_eq!(sink.0, 3);
        assert_eq!(clock.slept, vec![Duration::from_millis(TICK_MS as u64); 3]);
    }
}
