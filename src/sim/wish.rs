//! Wish scene: fireworks keep popping while the personal wish is shown

use rand::Rng;

use super::effects::{Firework, firework};
use super::state::CardEvent;
use super::timers::TimerSet;
use crate::consts::{FIREWORK_INITIAL, FIREWORK_INTERVAL_MS, FIREWORK_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LaunchFirework;

/// Reveal stage of the wish scene
#[derive(Debug)]
pub struct WishStage {
    /// Live fireworks, oldest first
    fireworks: Vec<Firework>,
    next_firework_id: u32,
    timers: TimerSet<LaunchFirework>,
}

impl WishStage {
    /// Mount the scene with an opening volley
    pub fn new<R: Rng>(rng: &mut R, events: &mut Vec<CardEvent>) -> Self {
        let mut timers = TimerSet::new("wish");
        timers.every(FIREWORK_INTERVAL_MS, LaunchFirework);
        let mut stage = Self {
            fireworks: Vec::with_capacity(FIREWORK_MAX + 1),
            next_firework_id: 1,
            timers,
        };
        for _ in 0..FIREWORK_INITIAL {
            stage.launch(rng, events);
        }
        stage
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    fn launch<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<CardEvent>) {
        let id = self.next_firework_id;
        self.next_firework_id += 1;
        self.fireworks.push(firework(rng, id));
        if self.fireworks.len() > FIREWORK_MAX {
            let excess = self.fireworks.len() - FIREWORK_MAX;
            self.fireworks.drain(..excess);
        }
        events.push(CardEvent::FireworkLaunched(id));
    }

    pub fn step<R: Rng>(&mut self, dt_ms: u64, rng: &mut R, events: &mut Vec<CardEvent>) {
        let until = self.timers.now_ms() + dt_ms;
        while let Some(LaunchFirework) = self.timers.pop_due(until) {
            self.launch(rng, events);
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
