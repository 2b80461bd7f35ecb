use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;
use tracing::warn;

use crate::world::TickReport;

const FIRE_TONE_HZ: f32 = 880.0;
const LIFE_LOST_TONE_HZ: f32 = 110.0;

/// Synthesized sound effects; silent when no output device is available
pub struct AudioManager {
    /// Stream must stay alive for the handle to keep playing
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    /// Opens the default output device.
    pub fn new() -> Result<Self, rodio::StreamError> {
        let output = OutputStream::try_default()?;
        Ok(Self {
            output: Some(output),
        })
    }

    pub fn disabled() -> Self {
        Self { output: None }
    }

    /// Opens audio unless muted, falling back to silence on failure.
    pub fn from_settings(mute: bool) -> Self {
        if mute {
            return Self::disabled();
        }
        Self::new().unwrap_or_else(|err| {
            warn!(error = %err, "audio unavailable, continuing without sound");
            Self::disabled()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Plays the effects for what happened during a tick
    pub fn play_report(&self, report: &TickReport) {
        if report.fired {
            self.play_tone(FIRE_TONE_HZ, Duration::from_millis(40), 0.02);
        }
        if report.lives_lost > 0 {
            self.play_tone(LIFE_LOST_TONE_HZ, Duration::from_millis(200), 0.05);
        }
    }

    fn play_tone(&self, frequency: f32, length: Duration, volume: f32) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        // Playback errors are dropped; a missed blip is not worth stopping the game
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            sink.append(SineWave::new(frequency).take_duration(length));
            sink.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_audio_is_disabled() {
        let audio = AudioManager::from_settings(true);
        assert!(!audio.is_enabled());
        // Must be a no-op rather than a panic
        audio.play_report(&TickReport {
            fired: true,
            lives_lost: 1,
            ..TickReport::default()
        });
    }
}
