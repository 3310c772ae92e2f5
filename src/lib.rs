//! Celebration Card - a multi-scene animated greeting card
//!
//! Core modules:
//! - `sim`: Deterministic scene sequencing (state machine, timers, reveals)
//! - `ui`: View model and DOM presentation
//! - `audio`: Procedural sound cues (web only)
//! - `settings`: Presentation preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{CardError, CardResult};
pub use settings::{QualityPreset, Settings};

/// Sequencing constants (all durations in milliseconds)
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT_MS: u64 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 16;

    /// Maximum stored name length (characters)
    pub const MAX_NAME_CHARS: usize = 30;

    /// Loading bar
    pub const LOADING_STEP: u8 = 2;
    pub const LOADING_INTERVAL_MS: u64 = 60;
    pub const LOADING_COMPLETE_DELAY_MS: u64 = 500;

    /// Envelope staged reveal offsets (from the opening click)
    pub const ENVELOPE_MESSAGE_DELAY_MS: u64 = 600;
    pub const ENVELOPE_GREETING_DELAY_MS: u64 = 1500;
    pub const ENVELOPE_BUTTON_DELAY_MS: u64 = 2300;

    /// Wish scene fireworks
    pub const FIREWORK_INITIAL: usize = 3;
    pub const FIREWORK_INTERVAL_MS: u64 = 800;
    pub const FIREWORK_MAX: usize = 8;

    /// Sticker animation length
    pub const STICKER_ACTIVE_MS: u64 = 600;

    /// Final scene
    pub const HUG_THRESHOLD: u32 = 3;
    pub const BURST_MIN_ITEMS: usize = 15;
    pub const BURST_MAX_ITEMS: usize = 24;
    pub const BURST_LIFETIME_MS: u64 = 2000;
    pub const FAREWELL_DELAY_MS: u64 = 1000;
    pub const CONFETTI_PIECES: usize = 100;
    pub const CONFETTI_LIFETIME_MS: u64 = 4000;
    /// Hearts shown under the hug button are capped at this many
    pub const HUG_HEARTS_MAX: u32 = 10;
}

/// Clamp a string to at most `max` characters (not bytes)
#[inline]
pub fn clamp_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
