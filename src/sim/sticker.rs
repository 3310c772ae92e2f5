//! Sticker scene: tap a sticker and it plays a random little animation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::CardEvent;
use super::timers::TimerSet;
use crate::consts::STICKER_ACTIVE_MS;

/// Animation a tapped sticker plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StickerAnimation {
    Bounce,
    Spin,
    Pop,
    Glow,
}

impl StickerAnimation {
    pub const ALL: [StickerAnimation; 4] = [
        StickerAnimation::Bounce,
        StickerAnimation::Spin,
        StickerAnimation::Pop,
        StickerAnimation::Glow,
    ];

    /// CSS class driving the animation
    pub fn css_class(self) -> &'static str {
        match self {
            StickerAnimation::Bounce => "anim-bounce",
            StickerAnimation::Spin => "anim-spin",
            StickerAnimation::Pop => "anim-pop",
            StickerAnimation::Glow => "anim-glow",
        }
    }
}

/// Fixed sticker placement
#[derive(Debug, Clone, Copy)]
pub struct StickerSpec {
    pub glyph: &'static str,
    /// Percent of the viewport
    pub pos: Vec2,
    /// Resting rotation (degrees)
    pub rotation: f32,
    pub scale: f32,
}

const fn sticker(glyph: &'static str, x: f32, y: f32, rotation: f32, scale: f32) -> StickerSpec {
    StickerSpec {
        glyph,
        pos: Vec2::new(x, y),
        rotation,
        scale,
    }
}

pub const STICKERS: [StickerSpec; 10] = [
    sticker("🎁", 15.0, 20.0, -15.0, 1.0),
    sticker("💖", 75.0, 15.0, 10.0, 1.1),
    sticker("⭐", 85.0, 45.0, -5.0, 0.9),
    sticker("😊", 10.0, 55.0, 12.0, 1.0),
    sticker("🌟", 45.0, 12.0, -8.0, 1.2),
    sticker("🎀", 25.0, 75.0, 15.0, 0.95),
    sticker("💫", 70.0, 70.0, -10.0, 1.05),
    sticker("🦋", 55.0, 80.0, 5.0, 1.0),
    sticker("🌸", 88.0, 25.0, -20.0, 0.9),
    sticker("✨", 5.0, 35.0, 8.0, 1.1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StickerSettled(usize);

/// Reveal stage of the sticker scene
#[derive(Debug)]
pub struct StickerStage {
    /// Animation currently playing per sticker
    active: [Option<StickerAnimation>; STICKERS.len()],
    timers: TimerSet<StickerSettled>,
}

impl Default for StickerStage {
    fn default() -> Self {
        Self::new()
    }
}

impl StickerStage {
    pub fn new() -> Self {
        Self {
            active: [None; STICKERS.len()],
            timers: TimerSet::new("sticker"),
        }
    }

    pub fn active(&self, index: usize) -> Option<StickerAnimation> {
        self.active.get(index).copied().flatten()
    }

    /// Tap a sticker. Ignored while it is still animating or out of range.
    pub fn tap<R: Rng>(
        &mut self,
        index: usize,
        rng: &mut R,
        events: &mut Vec<CardEvent>,
    ) -> bool {
        let Some(slot) = self.active.get_mut(index) else {
            log::warn!("sticker: no sticker at index {}", index);
            return false;
        };
        if slot.is_some() {
            return false;
        }
        let animation = StickerAnimation::ALL[rng.random_range(0..StickerAnimation::ALL.len())];
        *slot = Some(animation);
        self.timers.after(STICKER_ACTIVE_MS, StickerSettled(index));
        events.push(CardEvent::StickerAnimated { index, animation });
        true
    }

    pub fn step(&mut self, dt_ms: u64) {
        let until = self.timers.now_ms() + dt_ms;
        while let Some(StickerSettled(index)) = self.timers.pop_due(until) {
            self.active[index] = None;
        }
        self.timers.settle(until);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn teardown(&mut self) -> usize {
        self.timers.cancel_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tap_ignored_while_active() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut events = Vec::new();
        let mut stage = StickerStage::new();

        assert!(stage.tap(2, &mut rng, &mut events));
        assert!(stage.active(2).is_some());
        assert!(!stage.tap(2, &mut rng, &mut events));
        assert_eq!(stage.pending_timers(), 1);

        stage.step(STICKER_ACTIVE_MS - 1);
        assert!(stage.active(2).is_some());
        stage.step(1);
        assert!(stage.active(2).is_none());
        assert!(stage.tap(2, &mut rng, &mut events));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_stickers_animate_independently() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut events = Vec::new();
        let mut stage = StickerStage::new();
        stage.tap(0, &mut rng, &mut events);
        stage.step(300);
        stage.tap(1, &mut rng, &mut events);
        stage.step(300);
        assert!(stage.active(0).is_none());
        assert!(stage.active(1).is_some());
    }

    #[test]
    fn test_out_of_range_tap() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut events = Vec::new();
        let mut stage = StickerStage::new();
        assert!(!stage.tap(STICKERS.len(), &mut rng, &mut events));
        assert!(events.is_empty());
        assert_eq!(stage.active(99), None);
    }
}
