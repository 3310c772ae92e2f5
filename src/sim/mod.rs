//! Deterministic scene sequencing
//!
//! All card logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, on virtual per-scene clocks
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod effects;
pub mod envelope;
pub mod finale;
pub mod flip_cards;
pub mod loading;
pub mod name_input;
pub mod scene;
pub mod state;
pub mod sticker;
pub mod tick;
pub mod timers;
pub mod wish;

pub use effects::{BurstId, BurstItem, ConfettiPiece, Firework};
pub use envelope::{EnvelopeReveal, EnvelopeStage};
pub use finale::FinaleStage;
pub use flip_cards::{FlipCardsStage, WISH_CARDS, WishCard};
pub use loading::LoadingStage;
pub use name_input::{NameDraft, normalize_name};
pub use scene::SceneId;
pub use state::{CardEvent, Session, Stage};
pub use sticker::{STICKERS, StickerAnimation, StickerSpec, StickerStage};
pub use tick::{Action, TickInput, tick};
pub use timers::{TimerId, TimerSet};
pub use wish::WishStage;
