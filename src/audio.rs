use std::io::Write;

/// Narrow audio collaborator. Implementations are best-effort: a sink that
/// cannot emit sound stays silent, it never fails the game.
pub trait AudioSink {
    fn play_success(&mut self);
    fn play_error(&mut self);
    /// Loop the background track, if the sink has one.
    fn start_music(&mut self) {}
    fn set_music_volume(&mut self, _volume: f64) {}
    fn set_sfx_volume(&mut self, _volume: f64) {}
}

/// Terminal bell sink. The only one-shot sound a plain terminal offers is
/// BEL, so both effects map to it and any non-zero SFX volume enables it.
pub struct TerminalBell {
    sfx_volume: f64,
}

impl TerminalBell {
    pub fn new(sfx_volume: f64) -> Self {
        Self { sfx_volume }
    }

    fn ring(&self) {
        if self.sfx_volume > 0.0 {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}

impl AudioSink for TerminalBell {
    fn play_success(&mut self) {
        self.ring();
    }

    fn play_error(&mut self) {
        self.ring();
    }

    fn set_sfx_volume(&mut self, volume: f64) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }
}

/// Silent sink for tests, headless runs, and `--mute`.
#[derive(Default)]
pub struct NullAudio {
    pub successes: u32,
    pub errors: u32,
}

impl AudioSink for NullAudio {
    fn play_success(&mut self) {
        self.successes += 1;
    }

    fn play_error(&mut self) {
        self.errors += 1;
    }
}
