//! Background music
//!
//! One looping track, on or off. Players are best-effort: a failure to start
//! playback is logged by the caller and the game carries on silently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MusicError {
    #[error("music playback unavailable")]
    Unavailable,
    #[error("music playback refused: {0}")]
    Refused(String),
}

/// Platform audio output for the background track
pub trait MusicPlayer {
    /// Start (or keep) looping the track at `volume` (0.0 - 1.0)
    fn play(&mut self, volume: f32) -> Result<(), MusicError>;
    fn pause(&mut self);
}

/// Native stand-in: writes state changes to the log
#[derive(Debug, Default)]
pub struct LogMusic;

impl MusicPlayer for LogMusic {
    fn play(&mut self, volume: f32) -> Result<(), MusicError> {
        log::info!("[music] playing at volume {volume:.1}");
        Ok(())
    }

    fn pause(&mut self) {
        log::info!("[music] paused");
    }
}

/// Browser `<audio>` element looping the bundled track (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct WebMusic {
    audio: Option<web_sys::HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl WebMusic {
    pub const TRACK_URL: &'static str = "./music.mp3";

    pub fn new() -> Self {
        let audio = web_sys::HtmlAudioElement::new_with_src(Self::TRACK_URL).ok();
        match &audio {
            Some(audio) => audio.set_loop(true),
            None => log::warn!("Failed to create audio element - music disabled"),
        }
        Self { audio }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for WebMusic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl MusicPlayer for WebMusic {
    fn play(&mut self, volume: f32) -> Result<(), MusicError> {
        let audio = self.audio.as_ref().ok_or(MusicError::Unavailable)?;
        audio.set_volume(f64::from(volume.clamp(0.0, 1.0)));
        // Browsers may reject autoplay until a user gesture; the returned
        // promise is left to settle on its own
        audio
            .play()
            .map(|_| ())
            .map_err(|e| MusicError::Refused(format!("{e:?}")))
    }

    fn pause(&mut self) {
        if let Some(audio) = &self.audio {
            let _ = audio.pause();
        }
    }
}

/// What a `RecordingMusic` was asked to do
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MusicCall {
    Play(f32),
    Pause,
}

/// Test player that records every call
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingMusic {
    pub calls: Vec<MusicCall>,
    pub fail: bool,
}

#[cfg(test)]
impl MusicPlayer for RecordingMusic {
    fn play(&mut self, volume: f32) -> Result<(), MusicError> {
        self.calls.push(MusicCall::Play(volume));
        if self.fail {
            return Err(MusicError::Unavailable);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(MusicCall::Pause);
    }
}
