//! Presentation of game progress.
//!
//! The runner hands an [`Observer`] a read-only [`Snapshot`] after every
//! applied move. What the observer does with it (draw, record, ignore) has no
//! effect on play.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::board::{Grid, Score};
use crate::constants::RULE;

/// Borrowed view of the score and grid at one step.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub score: Score,
    pub grid: &'a Grid,
}

/// Receives a snapshot once per applied move.
pub trait Observer {
    fn observe(&mut self, snapshot: &Snapshot<'_>);
}

/// Observer that discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Observer for NullDisplay {
    fn observe(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Redraws the grid on a terminal and pauses so the game can be followed.
pub struct TerminalDisplay<W: Write> {
    out: W,
    delay: Duration,
    clear: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout(delay: Duration) -> Self {
        Self::new(io::stdout(), delay)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            clear: true,
        }
    }

    /// Keep prior frames instead of clearing the screen before each one.
    pub fn without_clear(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        if self.clear {
            // Clear screen, cursor home.
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        writeln!(self.out, "Score: {}", snapshot.score)?;
        for row in snapshot.grid {
            for &tile in row {
                if tile == 0 {
                    write!(self.out, " . ")?;
                } else {
                    write!(self.out, "{tile} ")?;
                }
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "{RULE}")?;
        self.out.flush()
    }
}

impl<W: Write> Observer for TerminalDisplay<W> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        if let Err(e) = self.draw(snapshot) {
            warn!("failed to render board: {e}");
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_display_frame() {
        let grid = [[2, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 8]];
        let mut display = TerminalDisplay::new(Vec::new(), Duration::ZERO).without_clear();
        display.observe(&Snapshot { score: 12, grid: &grid });

        let text = String::from_utf8(display.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Score: 12");
        assert_eq!(lines[1], "2  .  .  . ");
        assert_eq!(lines[2], " . 4  .  . ");
        assert_eq!(lines[4], " .  .  . 8 ");
        assert_eq!(lines[5], RULE);
    }

    #[test]
    fn test_terminal_display_clears_by_default() {
        let grid = [[0; 4]; 4];
        let mut display = TerminalDisplay::new(Vec::new(), Duration::ZERO);
        display.observe(&Snapshot { score: 0, grid: &grid });
        let bytes = display.into_inner();
        assert!(bytes.starts_with(b"\x1b[2J\x1b[H"));
    }
}
