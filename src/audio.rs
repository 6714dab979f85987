//! Sound cues for game events.
//!
//! The game loop only reports events; this module decides which of them
//! make a sound. The terminal front end uses [`TerminalBell`].

use crate::game::GameEvent;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    GameOver,
}

impl SoundCue {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FoodEaten { .. } => Some(Self::Eat),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
            _ => None,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell. Write failures are logged and ignored.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    pub enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        // Game over gets a double ring.
        let bells: &[u8] = match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::GameOver => b"\x07\x07",
        };
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(bells).and_then(|_| stdout.flush()) {
            tracing::warn!(error = %e, "terminal bell failed");
        }
    }
}

/// Play the cue for each event that has one, in order.
pub fn notify(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for cue in events.iter().filter_map(SoundCue::for_event) {
        sink.play(cue);
    }
}
