//! View model: what the mounted scene should look like right now
//!
//! Built fresh from the session every frame. Presenters compare it with the
//! previous frame and only touch the screen when something changed.

use super::copy;
use super::keyed::Keyed;
use crate::settings::Settings;
use crate::sim::{BurstItem, STICKERS, SceneId, Session, Stage, WISH_CARDS};

/// One hug burst emoji, ready for CSS
#[derive(Debug, Clone, PartialEq)]
pub struct BurstView {
    pub glyph: &'static str,
    pub left_pct: f32,
    pub top_pct: f32,
    /// Flight displacement (px)
    pub dx: f32,
    pub dy: f32,
}

/// The drawn items of one hug burst
#[derive(Debug, Clone, PartialEq)]
pub struct BurstGroupView {
    pub id: u32,
    pub items: Vec<BurstView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireworkView {
    pub id: u32,
    pub left_pct: f32,
    pub top_pct: f32,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiView {
    pub index: usize,
    pub left_pct: f32,
    pub color: &'static str,
    pub width_px: f32,
    pub rotation_deg: f32,
    pub delay_s: f32,
    pub duration_s: f32,
    pub drift_px: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StickerView {
    pub index: usize,
    pub glyph: &'static str,
    pub left_pct: f32,
    pub top_pct: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    /// Animation class while the sticker is playing
    pub animation: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlipCardView {
    pub index: usize,
    pub front: &'static str,
    pub back: String,
    pub face_up: bool,
}

impl Keyed for BurstGroupView {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

impl Keyed for FireworkView {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

impl Keyed for ConfettiView {
    type Key = usize;

    fn key(&self) -> usize {
        self.index
    }
}

impl Keyed for StickerView {
    type Key = usize;

    fn key(&self) -> usize {
        self.index
    }
}

impl Keyed for FlipCardView {
    type Key = usize;

    fn key(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarewellView {
    pub title: String,
    pub line: &'static str,
    pub signature: &'static str,
}

/// Per-scene content
#[derive(Debug, Clone, PartialEq)]
pub enum SceneView {
    Loading {
        title: &'static str,
        progress: u8,
    },
    NameInput {
        draft: String,
        can_submit: bool,
    },
    Envelope {
        opened: bool,
        hint: Option<&'static str>,
        headline: Option<String>,
        greeting: Option<&'static str>,
        show_button: bool,
    },
    Wish {
        line: String,
        fireworks: Vec<FireworkView>,
    },
    Sticker {
        stickers: Vec<StickerView>,
    },
    FlipCards {
        cards: Vec<FlipCardView>,
    },
    Final {
        /// Hug prompt, replaced by the farewell once it shows
        prompt: Option<String>,
        hearts: u32,
        farewell: Option<FarewellView>,
        bursts: Vec<BurstGroupView>,
        confetti: Vec<ConfettiView>,
    },
}

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub scene: SceneId,
    pub content: SceneView,
}

fn pick(table: &[&'static str], index: u8) -> &'static str {
    table[index as usize % table.len()]
}

/// Draw at most `cap` items of a burst, spread around the whole circle
fn thin_burst(items: &[BurstItem], cap: usize) -> Vec<BurstView> {
    let stride = items.len().div_ceil(cap).max(1);
    items
        .iter()
        .step_by(stride)
        .map(|item| {
            let offset = item.offset();
            BurstView {
                glyph: pick(&copy::HUG_GLYPHS, item.glyph),
                left_pct: item.origin.x,
                top_pct: item.origin.y,
                dx: offset.x,
                dy: offset.y,
            }
        })
        .collect()
}

impl CardView {
    pub fn from_session(session: &Session, settings: &Settings) -> Self {
        let name = session.user_name();
        let content = match session.stage() {
            Stage::Loading(s) => SceneView::Loading {
                title: copy::LOADING_TITLE,
                progress: s.progress(),
            },
            Stage::NameInput(draft) => SceneView::NameInput {
                draft: draft.text().to_string(),
                can_submit: draft.can_submit(),
            },
            Stage::Envelope(s) => SceneView::Envelope {
                opened: s.is_open(),
                hint: (!s.is_open()).then_some(copy::ENVELOPE_HINT),
                headline: s.message_shown().then(|| copy::envelope_headline(name)),
                greeting: s.greeting_shown().then_some(copy::ENVELOPE_GREETING),
                show_button: s.button_shown(),
            },
            Stage::Wish(s) => {
                let shown = s.fireworks().len().min(settings.max_fireworks());
                let skip = s.fireworks().len() - shown;
                SceneView::Wish {
                    line: copy::wish_line(name),
                    fireworks: s.fireworks()[skip..]
                        .iter()
                        .map(|fw| FireworkView {
                            id: fw.id,
                            left_pct: fw.pos.x,
                            top_pct: fw.pos.y,
                            class: pick(&copy::FIREWORK_CLASSES, fw.color),
                        })
                        .collect(),
                }
            }
            Stage::Sticker(s) => SceneView::Sticker {
                stickers: STICKERS
                    .iter()
                    .enumerate()
                    .map(|(index, spec)| StickerView {
                        index,
                        glyph: spec.glyph,
                        left_pct: spec.pos.x,
                        top_pct: spec.pos.y,
                        rotation_deg: spec.rotation,
                        scale: spec.scale,
                        animation: s.active(index).map(|a| a.css_class()),
                    })
                    .collect(),
            },
            Stage::FlipCards(s) => SceneView::FlipCards {
                cards: WISH_CARDS
                    .iter()
                    .enumerate()
                    .map(|(index, card)| FlipCardView {
                        index,
                        front: card.front,
                        back: format!("{} {}", card.message, card.front),
                        face_up: s.is_flipped(index),
                    })
                    .collect(),
            },
            Stage::Final(s) => {
                let cap = settings.max_burst_items();
                let bursts = if cap == 0 {
                    Vec::new()
                } else {
                    s.bursts()
                        .map(|(id, items)| BurstGroupView {
                            id: id.0,
                            items: thin_burst(items, cap),
                        })
                        .collect()
                };
                let confetti = s
                    .confetti()
                    .iter()
                    .take(settings.max_confetti())
                    .enumerate()
                    .map(|(index, piece)| ConfettiView {
                        index,
                        left_pct: piece.x,
                        color: pick(&copy::CONFETTI_COLORS, piece.color),
                        width_px: piece.size,
                        rotation_deg: piece.rotation,
                        delay_s: piece.delay,
                        duration_s: piece.duration,
                        drift_px: piece.drift,
                    })
                    .collect();
                let farewell = s.farewell_shown().then(|| FarewellView {
                    title: copy::farewell_title(name),
                    line: copy::FAREWELL_LINE,
                    signature: copy::FAREWELL_SIGNATURE,
                });
                SceneView::Final {
                    prompt: (!s.farewell_shown()).then(|| copy::hug_prompt(name)),
                    hearts: if s.farewell_shown() { 0 } else { s.hearts() },
                    farewell,
                    bursts,
                    confetti,
                }
            }
        };

        Self {
            scene: session.current_scene(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{
        BURST_MAX_ITEMS, BURST_MIN_ITEMS, CONFETTI_PIECES, FAREWELL_DELAY_MS, FIREWORK_INTERVAL_MS,
        SIM_DT_MS,
    };
    use crate::settings::QualityPreset;
    use crate::sim::{Action, TickInput, tick};
    use crate::ui::keyed::diff_by_key;

    fn named_session(name: &str) -> Session {
        let mut session = Session::new(4);
        session.advance(SceneId::NameInput);
        session.submit_name(name);
        session
    }

    #[test]
    fn test_envelope_view_follows_reveals() {
        let mut session = named_session("Asha");
        let settings = Settings::default();

        let view = CardView::from_session(&session, &settings);
        let SceneView::Envelope { hint, headline, show_button, .. } = view.content else {
            panic!("expected envelope view");
        };
        assert!(hint.is_some());
        assert!(headline.is_none());
        assert!(!show_button);

        tick(&mut session, &TickInput::with([Action::OpenEnvelope]), 600);
        let view = CardView::from_session(&session, &settings);
        let SceneView::Envelope { hint, headline, greeting, .. } = view.content else {
            panic!("expected envelope view");
        };
        assert!(hint.is_none());
        assert_eq!(headline.as_deref(), Some("Hey Asha! Something special awaits 🎁"));
        assert!(greeting.is_none());
    }

    #[test]
    fn test_final_view_swaps_prompt_for_farewell() {
        let mut session = named_session("Asha");
        session.advance(SceneId::Final);
        let settings = Settings::from_preset(QualityPreset::High);

        for _ in 0..3 {
            tick(&mut session, &TickInput::with([Action::Hug]), SIM_DT_MS);
        }
        let view = CardView::from_session(&session, &settings);
        let SceneView::Final { prompt, hearts, farewell, bursts, .. } = view.content else {
            panic!("expected final view");
        };
        assert!(prompt.is_some());
        assert_eq!(hearts, 3);
        assert!(farewell.is_none());
        assert!(!bursts.is_empty());

        tick(&mut session, &TickInput::default(), FAREWELL_DELAY_MS);
        let view = CardView::from_session(&session, &settings);
        let SceneView::Final { prompt, farewell, confetti, .. } = view.content else {
            panic!("expected final view");
        };
        assert!(prompt.is_none());
        assert!(farewell.unwrap().title.starts_with("Asha"));
        assert_eq!(confetti.len(), CONFETTI_PIECES);
    }

    #[test]
    fn test_reduced_motion_hides_decorations() {
        let mut session = named_session("Asha");
        session.advance(SceneId::Final);
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        tick(&mut session, &TickInput::with([Action::Hug]), SIM_DT_MS);
        let view = CardView::from_session(&session, &settings);
        let SceneView::Final { bursts, hearts, .. } = view.content else {
            panic!("expected final view");
        };
        assert!(bursts.is_empty());
        // The counter still works without the particles
        assert_eq!(hearts, 1);
    }

    #[test]
    fn test_wish_view_respects_firework_cap() {
        let mut session = named_session("Asha");
        session.advance(SceneId::Wish);
        let settings = Settings::from_preset(QualityPreset::Low);
        tick(&mut session, &TickInput::default(), 10_000);
        let view = CardView::from_session(&session, &settings);
        let SceneView::Wish { line, fireworks } = view.content else {
            panic!("expected wish view");
        };
        assert!(line.starts_with("Dear Asha,"));
        assert_eq!(fireworks.len(), 3);
        // Newest are kept
        assert!(fireworks.windows(2).all(|w| w[0].id < w[1].id));
    }

    fn final_bursts(session: &Session, settings: &Settings) -> Vec<BurstGroupView> {
        match CardView::from_session(session, settings).content {
            SceneView::Final { bursts, .. } => bursts,
            other => panic!("expected final view, got {other:?}"),
        }
    }

    fn wish_fireworks(session: &Session, settings: &Settings) -> Vec<FireworkView> {
        match CardView::from_session(session, settings).content {
            SceneView::Wish { fireworks, .. } => fireworks,
            other => panic!("expected wish view, got {other:?}"),
        }
    }

    #[test]
    fn test_second_hug_leaves_first_burst_untouched() {
        let mut session = named_session("Asha");
        session.advance(SceneId::Final);
        let settings = Settings::default();

        tick(&mut session, &TickInput::with([Action::Hug]), SIM_DT_MS);
        let before = final_bursts(&session, &settings);
        tick(&mut session, &TickInput::with([Action::Hug]), SIM_DT_MS);
        let after = final_bursts(&session, &settings);

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0], before[0]);
        let diff = diff_by_key(&before, &after);
        assert_eq!(diff.added, vec![1]);
        assert!(diff.removed.is_empty());
        assert!(diff.changed.is_empty());
    }

    #[test]
    fn test_new_firework_only_appends() {
        let mut session = named_session("Asha");
        session.advance(SceneId::Wish);
        let settings = Settings::default();

        let before = wish_fireworks(&session, &settings);
        tick(&mut session, &TickInput::default(), FIREWORK_INTERVAL_MS);
        let after = wish_fireworks(&session, &settings);

        let ids: Vec<u32> = after.iter().map(|fw| fw.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let diff = diff_by_key(&before, &after);
        assert_eq!(diff.added, vec![3]);
        assert!(diff.removed.is_empty());
        assert!(diff.changed.is_empty());
    }

    #[test]
    fn test_burst_items_capped_per_preset() {
        let mut session = named_session("Asha");
        session.advance(SceneId::Final);
        for _ in 0..3 {
            tick(&mut session, &TickInput::with([Action::Hug]), SIM_DT_MS);
        }

        let low = final_bursts(&session, &Settings::from_preset(QualityPreset::Low));
        assert_eq!(low.len(), 3);
        assert!(low.iter().all(|b| (1..=8).contains(&b.items.len())));

        let high = final_bursts(&session, &Settings::from_preset(QualityPreset::High));
        assert!(high.iter().all(|b| {
            (BURST_MIN_ITEMS..=BURST_MAX_ITEMS).contains(&b.items.len())
        }));
    }
}
