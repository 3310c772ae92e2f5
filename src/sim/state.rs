//! Session state and the scene controller
//!
//! The session holds the shared data (the visitor's name) and exactly one
//! mounted scene stage. Mounting a new stage drops the old one, and with it
//! every timer the old scene still had pending.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::BurstId;
use super::envelope::{EnvelopeReveal, EnvelopeStage};
use super::finale::FinaleStage;
use super::flip_cards::FlipCardsStage;
use super::loading::LoadingStage;
use super::name_input::{NameDraft, normalize_name};
use super::scene::SceneId;
use super::sticker::{StickerAnimation, StickerStage};
use super::wish::WishStage;

/// Things that happened during a tick, in order. Consumed by the front end
/// for sound cues and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardEvent {
    SceneEntered(SceneId),
    SceneExited { scene: SceneId, cancelled_timers: usize },
    LoadingComplete,
    NameRejected,
    NameAccepted(String),
    EnvelopeOpened,
    EnvelopeRevealed(EnvelopeReveal),
    FireworkLaunched(u32),
    StickerAnimated { index: usize, animation: StickerAnimation },
    CardFlipped { index: usize, face_up: bool },
    HugBurst { burst: BurstId, items: usize, hugs: u32 },
    BurstExpired(BurstId),
    FarewellScheduled,
    FarewellRevealed,
    ConfettiFired,
    ConfettiCleared,
    Restarted,
}

/// Ephemeral state of the mounted scene
#[derive(Debug)]
pub enum Stage {
    Loading(LoadingStage),
    NameInput(NameDraft),
    Envelope(EnvelopeStage),
    Wish(WishStage),
    Sticker(StickerStage),
    FlipCards(FlipCardsStage),
    Final(FinaleStage),
}

impl Stage {
    fn mount(scene: SceneId, rng: &mut Pcg32, events: &mut Vec<CardEvent>) -> Self {
        match scene {
            SceneId::Loading => Stage::Loading(LoadingStage::new()),
            SceneId::NameInput => Stage::NameInput(NameDraft::new()),
            SceneId::Envelope => Stage::Envelope(EnvelopeStage::new()),
            SceneId::Wish => Stage::Wish(WishStage::new(rng, events)),
            SceneId::Sticker => Stage::Sticker(StickerStage::new()),
            SceneId::FlipCards => Stage::FlipCards(FlipCardsStage::new()),
            SceneId::Final => Stage::Final(FinaleStage::new()),
        }
    }

    pub fn scene(&self) -> SceneId {
        match self {
            Stage::Loading(_) => SceneId::Loading,
            Stage::NameInput(_) => SceneId::NameInput,
            Stage::Envelope(_) => SceneId::Envelope,
            Stage::Wish(_) => SceneId::Wish,
            Stage::Sticker(_) => SceneId::Sticker,
            Stage::FlipCards(_) => SceneId::FlipCards,
            Stage::Final(_) => SceneId::Final,
        }
    }

    /// Timers still pending in this scene
    pub fn pending_timers(&self) -> usize {
        match self {
            Stage::Loading(s) => s.pending_timers(),
            Stage::Envelope(s) => s.pending_timers(),
            Stage::Wish(s) => s.pending_timers(),
            Stage::Sticker(s) => s.pending_timers(),
            Stage::Final(s) => s.pending_timers(),
            Stage::NameInput(_) | Stage::FlipCards(_) => 0,
        }
    }

    /// Cancel every pending timer of this scene
    fn teardown(&mut self) -> usize {
        match self {
            Stage::Loading(s) => s.teardown(),
            Stage::Envelope(s) => s.teardown(),
            Stage::Wish(s) => s.teardown(),
            Stage::Sticker(s) => s.teardown(),
            Stage::Final(s) => s.teardown(),
            Stage::NameInput(_) | Stage::FlipCards(_) => 0,
        }
    }

    /// Whether the scene's continue control is available
    pub fn can_continue(&self) -> bool {
        match self {
            Stage::Envelope(s) => s.button_shown(),
            Stage::Wish(_) | Stage::Sticker(_) | Stage::FlipCards(_) => true,
            Stage::Loading(_) | Stage::NameInput(_) | Stage::Final(_) => false,
        }
    }
}

/// The scene controller plus shared session data
#[derive(Debug)]
pub struct Session {
    /// Seed the decorations are drawn from
    pub seed: u64,
    rng: Pcg32,
    user_name: String,
    stage: Stage,
    /// Total simulated time (ms)
    pub elapsed_ms: u64,
    /// Number of scene changes so far
    pub transitions: u32,
    events: Vec<CardEvent>,
}

impl Session {
    /// Start a new session on the loading scene
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut events = vec![CardEvent::SceneEntered(SceneId::Loading)];
        let stage = Stage::mount(SceneId::Loading, &mut rng, &mut events);
        Self {
            seed,
            rng,
            user_name: String::new(),
            stage,
            elapsed_ms: 0,
            transitions: 0,
            events,
        }
    }

    pub fn current_scene(&self) -> SceneId {
        self.stage.scene()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub(crate) fn stage_mut(&mut self) -> (&mut Stage, &mut Pcg32, &mut Vec<CardEvent>) {
        (&mut self.stage, &mut self.rng, &mut self.events)
    }

    /// Timers pending across the whole session (only the mounted scene can
    /// own any)
    pub fn pending_timers(&self) -> usize {
        self.stage.pending_timers()
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<CardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch to `target`, tearing down the current scene first
    pub fn advance(&mut self, target: SceneId) {
        let from = self.stage.scene();
        let cancelled_timers = self.stage.teardown();
        self.events.push(CardEvent::SceneExited {
            scene: from,
            cancelled_timers,
        });

        self.events.push(CardEvent::SceneEntered(target));
        self.stage = Stage::mount(target, &mut self.rng, &mut self.events);
        self.transitions += 1;
        log::info!(
            "Scene {} -> {} (cancelled {} timer(s))",
            from,
            target,
            cancelled_timers
        );
    }

    /// Accept the visitor's name and open the envelope scene.
    ///
    /// Blank names (and submissions outside the name scene) change nothing.
    pub fn submit_name(&mut self, name: &str) -> bool {
        if self.current_scene() != SceneId::NameInput {
            log::warn!("Name submitted outside name entry ({})", self.current_scene());
            return false;
        }
        let Some(name) = normalize_name(name) else {
            self.events.push(CardEvent::NameRejected);
            return false;
        };
        self.user_name = name.clone();
        self.events.push(CardEvent::NameAccepted(name));
        self.advance(SceneId::Envelope);
        true
    }

    /// Follow the mounted scene's continue control, if it is available
    pub fn continue_scene(&mut self) -> bool {
        if !self.stage.can_continue() {
            return false;
        }
        match self.current_scene().next() {
            Some(next) => {
                self.advance(next);
                true
            }
            None => false,
        }
    }

    /// Back to the very beginning with no name
    pub fn restart(&mut self) {
        self.user_name.clear();
        self.events.push(CardEvent::Restarted);
        self.advance(SceneId::Loading);
    }

    /// Restart through the "experience again" control, which only exists
    /// once the farewell is on screen
    pub fn request_restart(&mut self) -> bool {
        match &self.stage {
            Stage::Final(finale) if finale.farewell_shown() => {
                self.restart();
                true
            }
            _ => false,
        }
    }
}
