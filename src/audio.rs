//! Audio and haptic cues
//!
//! Turns session events into sound effects, music control and vibration,
//! honouring the player's settings. Playback itself belongs to whatever
//! implements [`SoundSink`].

use crate::settings::UserSettings;
use crate::sim::SessionEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Block placed
    Drop,
    /// Block placed within the perfect threshold
    Perfect,
    /// Block missed the stack
    GameOver,
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
    Resume,
    Stop,
}

/// Output side of the audio system
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
    fn music(&mut self, command: MusicCommand);
    fn vibrate(&mut self, millis: u32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx {effect:?}");
    }

    fn music(&mut self, command: MusicCommand) {
        log::debug!("music {command:?}");
    }

    fn vibrate(&mut self, millis: u32) {
        log::debug!("vibrate {millis}ms");
    }
}

/// Length of the haptic pulse on a placement
const DROP_VIBRATION_MS: u32 = 20;

/// Maps session events to cues for the game's sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioManager {
    sound_enabled: bool,
    music_enabled: bool,
    vibration_enabled: bool,
}

impl AudioManager {
    pub fn new(settings: &UserSettings) -> Self {
        Self {
            sound_enabled: settings.sound_enabled,
            music_enabled: settings.music_enabled,
            vibration_enabled: settings.vibration_enabled,
        }
    }

    /// Pick up changed settings
    pub fn apply_settings(&mut self, settings: &UserSettings) {
        *self = Self::new(settings);
    }

    fn sfx(&self, sink: &mut impl SoundSink, effect: SoundEffect) {
        if self.sound_enabled {
            sink.play(effect);
        }
    }

    fn music(&self, sink: &mut impl SoundSink, command: MusicCommand) {
        if self.music_enabled {
            sink.music(command);
        }
    }

    /// Emit the cues for one event
    pub fn handle(&self, event: &SessionEvent, sink: &mut impl SoundSink) {
        match event {
            SessionEvent::Placed { perfect_hit, .. } => {
                let effect = if *perfect_hit {
                    SoundEffect::Perfect
                } else {
                    SoundEffect::Drop
                };
                self.sfx(sink, effect);
                if self.vibration_enabled {
                    sink.vibrate(DROP_VIBRATION_MS);
                }
            }
            SessionEvent::GameOver { .. } => {
                self.sfx(sink, SoundEffect::GameOver);
                self.music(sink, MusicCommand::Stop);
            }
            SessionEvent::Started | SessionEvent::Continued { .. } => {
                self.music(sink, MusicCommand::Play)
            }
            SessionEvent::Paused => self.music(sink, MusicCommand::Pause),
            SessionEvent::Resumed => self.music(sink, MusicCommand::Resume),
            SessionEvent::Reset => self.music(sink, MusicCommand::Stop),
            SessionEvent::LevelUp { .. } | SessionEvent::HighScore { .. } => {}
        }
    }
}
