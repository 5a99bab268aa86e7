//! Kids Match - a bilingual (Arabic/English) matching game for young children
//!
//! Core modules:
//! - `catalog`: Static content lists (letters, numbers, shapes, pictures)
//! - `engine`: Round progression (item selection, decoys, answer checks, stages)
//! - `shell`: Presentation shell wiring the engine to speech, ads and preferences
//! - `schedule`: Cancellable delayed tasks tagged by session generation
//! - `speech`, `ads`, `music`: External collaborator facades
//! - `settings`, `persistence`: The music preference and where it is stored
//! - `platform`: Browser/native differences (logging, back navigation)
//! - `web`: Browser entry point exposing the shell to JavaScript (WASM only)

pub mod ads;
pub mod catalog;
pub mod engine;
pub mod music;
pub mod persistence;
pub mod platform;
pub mod schedule;
pub mod settings;
pub mod shell;
pub mod speech;
pub mod strings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Category, Item, Language, StyleToken, items_for};
pub use engine::{Advance, Outcome, Phase, Round, RoundId, Session, SessionError};
pub use settings::Settings;
pub use shell::{Screen, Shell, View};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Rounds per cycle; finishing the last one triggers an interstitial
    pub const STAGES_PER_CYCLE: u8 = 4;
    /// Number of style tokens items cycle through
    pub const PALETTE_SIZE: usize = 8;

    /// Pause between a correct answer and the next round (feedback plays here)
    pub const SETTLE_DELAY: Duration = Duration::from_millis(1600);
    /// Pause before the new prompt is spoken
    pub const PROMPT_SPEECH_DELAY: Duration = Duration::from_millis(400);

    /// Banner load attempts after the first failure
    pub const BANNER_MAX_RETRIES: u32 = 5;
    /// Wait between banner attempts
    pub const BANNER_RETRY_DELAY: Duration = Duration::from_secs(10);
    /// Wait before preparing the next interstitial after one was shown
    pub const INTERSTITIAL_REARM_DELAY: Duration = Duration::from_secs(2);

    /// Speech tuning (a slightly higher, slower child-friendly voice)
    pub const SPEECH_PITCH: f32 = 1.2;
    pub const SPEECH_RATE: f32 = 0.95;

    /// Background track volume (0.0 - 1.0)
    pub const MUSIC_VOLUME: f32 = 0.1;
}
