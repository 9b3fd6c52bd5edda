//! Audio capability
//!
//! The simulation only emits sound cues. Synthesis and playback belong to
//! the host, which implements `AudioSink` or drains a `SoundQueue` after
//! each frame.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundKind {
    /// Ground or air jump
    Jump,
    /// Touched down after being airborne
    Land,
    /// Spin kick started
    Kick,
    /// Sword stab started
    Sword,
    /// Player fired a bullet
    Shoot,
    /// Pickup collected
    Star,
    /// Enemy hit or enemy projectile destroyed
    Enemy,
    /// Player took damage
    Damage,
    /// Run ended
    Death,
}

/// Anything that can play a sound cue
pub trait AudioSink {
    fn play_sound(&mut self, kind: SoundKind);
}

/// Per-channel mute toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteState {
    pub music: bool,
    pub sfx: bool,
}

impl MuteState {
    /// Saved audio prefs
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            music: settings.music_muted,
            sfx: settings.sfx_muted,
        }
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music = !self.music;
        self.music
    }

    pub fn toggle_sfx(&mut self) -> bool {
        self.sfx = !self.sfx;
        self.sfx
    }
}

/// Buffers cues for the host to play after the frame
#[derive(Debug, Clone, Default)]
pub struct SoundQueue {
    pub mute: MuteState,
    pending: Vec<SoundKind>,
}

impl SoundQueue {
    pub fn new(mute: MuteState) -> Self {
        Self {
            mute,
            pending: Vec::new(),
        }
    }

    /// Take every cue queued since the last drain
    pub fn drain(&mut self) -> Vec<SoundKind> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl AudioSink for SoundQueue {
    fn play_sound(&mut self, kind: SoundKind) {
        if self.mute.sfx {
            return;
        }
        self.pending.push(kind);
    }
}

/// Sink that drops everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play_sound(&mut self, _kind: SoundKind) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_collects_and_drains() {
        let mut queue = SoundQueue::default();
        queue.play_sound(SoundKind::Jump);
        queue.play_sound(SoundKind::Land);
        assert_eq!(queue.drain(), vec![SoundKind::Jump, SoundKind::Land]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sfx_mute_drops_cues() {
        let mut queue = SoundQueue::default();
        assert!(queue.mute.toggle_sfx());
        queue.play_sound(SoundKind::Death);
        assert!(queue.is_empty());

        // Music mute has no effect on cues
        let mut queue = SoundQueue::default();
        queue.mute.toggle_music();
        queue.play_sound(SoundKind::Star);
        assert_eq!(queue.drain(), vec![SoundKind::Star]);
    }

    #[test]
    fn test_mute_from_settings() {
        let settings = Settings {
            sfx_muted: true,
            ..Settings::default()
        };
        let mute = MuteState::from_settings(&settings);
        assert!(mute.sfx);
        assert!(!mute.music);
    }
}
