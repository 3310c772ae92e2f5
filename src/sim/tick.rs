//! Fixed timestep session tick
//!
//! Applies the visitor's discrete actions, then advances the mounted scene's
//! timers deterministically.

use super::scene::SceneId;
use super::state::{CardEvent, Session, Stage};

/// A discrete input from the visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Name field contents changed
    EditName(String),
    /// Submit the current name draft
    SubmitDraft,
    /// Click on the envelope
    OpenEnvelope,
    /// The scene's continue button
    Continue,
    TapSticker(usize),
    FlipCard(usize),
    /// Tap on the hug button
    Hug,
    /// "Experience again" on the farewell
    Restart,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Actions in the order they happened
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn with(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

/// Advance the session by one fixed timestep, returning what happened
pub fn tick(session: &mut Session, input: &TickInput, dt_ms: u64) -> Vec<CardEvent> {
    for action in &input.actions {
        apply_action(session, action);
    }

    let loading_done = {
        let (stage, rng, events) = session.stage_mut();
        match stage {
            Stage::Loading(s) => s.step(dt_ms, events),
            Stage::Envelope(s) => {
                s.step(dt_ms, events);
                false
            }
            Stage::Wish(s) => {
                s.step(dt_ms, rng, events);
                false
            }
            Stage::Sticker(s) => {
                s.step(dt_ms);
                false
            }
            Stage::Final(s) => {
                s.step(dt_ms, rng, events);
                false
            }
            Stage::NameInput(_) | Stage::FlipCards(_) => false,
        }
    };
    // The only transition that happens without the visitor
    if loading_done {
        session.advance(SceneId::NameInput);
    }

    session.elapsed_ms += dt_ms;
    session.take_events()
}

fn apply_action(session: &mut Session, action: &Action) {
    let scene = session.current_scene();
    let handled = match action {
        Action::SubmitDraft => match session.stage() {
            Stage::NameInput(draft) => {
                let name = draft.text().to_string();
                session.submit_name(&name);
                true
            }
            _ => false,
        },
        Action::Continue => session.continue_scene(),
        Action::Restart => session.request_restart(),
        _ => {
            let (stage, rng, events) = session.stage_mut();
            match (stage, action) {
                (Stage::NameInput(draft), Action::EditName(text)) => {
                    draft.edit(text);
                    true
                }
                (Stage::Envelope(s), Action::OpenEnvelope) => s.open(events),
                (Stage::Sticker(s), Action::TapSticker(i)) => s.tap(*i, rng, events),
                (Stage::FlipCards(s), Action::FlipCard(i)) => s.flip(*i, events),
                (Stage::Final(s), Action::Hug) => {
                    s.hug(rng, events);
                    true
                }
                _ => false,
            }
        }
    };
    if !handled {
        log::debug!("{:?} had no effect in scene {}", action, scene);
    }
}
