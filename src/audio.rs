/// Sound cues emitted by the simulation, and the sinks that consume them.
///
/// The core never waits on audio: a tick returns its cues and the host hands
/// them to whatever `AudioSink` it was configured with.

use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    Explosion,
    /// Pickup chime, also used when the shield breaks.
    PowerUp,
    BossSpawn,
    GameOver,
}

impl Sound {
    pub fn name(self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::Explosion => "explosion",
            Sound::PowerUp => "power-up",
            Sound::BossSpawn => "boss-spawn",
            Sound::GameOver => "game-over",
        }
    }
}

pub trait AudioSink {
    /// Fire-and-forget.  Implementations must not block.
    fn play(&mut self, sound: Sound);

    fn play_all(&mut self, sounds: &[Sound]) {
        for &sound in sounds {
            self.play(sound);
        }
    }

    /// Hand any queued terminal output to the frame writer.  The host calls
    /// this before drawing, so it never lands inside an escape sequence.
    fn drain_to(&mut self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// Records cues in order.  Handy for tests and for replaying a frame's cues.
impl AudioSink for Vec<Sound> {
    fn play(&mut self, sound: Sound) {
        self.push(sound);
    }
}

/// Silent sink that only traces each cue.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(sound = sound.name(), "sound cue");
    }
}

/// Rings the terminal bell for the loud cues (explosions, boss, game over).
/// Shots and pickups stay silent so the bell doesn't drone.
#[derive(Debug, Default)]
pub struct BellAudio {
    pending: usize,
}

impl BellAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for BellAudio {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(sound = sound.name(), "sound cue");
        if matches!(sound, Sound::Explosion | Sound::BossSpawn | Sound::GameOver) {
            self.pending += 1;
        }
    }

    fn drain_to(&mut self, out: &mut dyn Write) -> io::Result<()> {
        for _ in 0..self.pending {
            out.write_all(b"\x07")?;
        }
        self.pending = 0;
        Ok(())
    }
}
