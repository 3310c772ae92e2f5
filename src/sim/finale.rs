//! Final scene: virtual hugs, then the farewell message
//!
//! Every hug throws a burst of emoji that is cleaned up by its own burst id
//! after `BURST_LIFETIME_MS`. The hug that reaches `HUG_THRESHOLD` arms a
//! single delayed farewell reveal; the `farewell_triggered` flag keeps later
//! hugs from arming it again.

use rand::Rng;

use super::effects::{BurstId, BurstItem, ConfettiPiece, confetti, hug_burst};
use super::state::CardEvent;
use super::timers::TimerSet;
use crate::consts::{
    BURST_LIFETIME_MS, CONFETTI_LIFETIME_MS, FAREWELL_DELAY_MS, HUG_HEARTS_MAX, HUG_THRESHOLD,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FinaleTimer {
    ExpireBurst(BurstId),
    RevealFarewell,
    ClearConfetti,
}

/// Reveal stage of the final scene
#[derive(Debug)]
pub struct FinaleStage {
    hugs: u32,
    /// Items of every live burst, oldest burst first
    bursts: Vec<BurstItem>,
    next_burst: u32,
    farewell_triggered: bool,
    farewell_shown: bool,
    confetti: Vec<ConfettiPiece>,
    timers: TimerSet<FinaleTimer>,
}

impl Default for FinaleStage {
    fn default() -> Self {
        Self::new()
    }
}

impl FinaleStage {
    pub fn new() -> Self {
        Self {
            hugs: 0,
            bursts: Vec::new(),
            next_burst: 1,
            farewell_triggered: false,
            farewell_shown: false,
            confetti: Vec::new(),
            timers: TimerSet::new("final"),
        }
    }

    pub fn hugs(&self) -> u32 {
        self.hugs
    }

    /// Hearts under the hug button
    pub fn hearts(&self) -> u32 {
        self.hugs.min(HUG_HEARTS_MAX)
    }

    /// Live bursts with their items, oldest first
    pub fn bursts(&self) -> impl Iterator<Item = (BurstId, &[BurstItem])> + '_ {
        self.bursts
            .chunk_by(|a, b| a.burst == b.burst)
            .map(|items| (items[0].burst, items))
    }

    pub fn farewell_triggered(&self) -> bool {
        self.farewell_triggered
    }

    pub fn farewell_shown(&self) -> bool {
        self.farewell_shown
    }

    pub fn confetti(&self) -> &[ConfettiPiece] {
        &self.confetti
    }

    /// One tap on the hug button
    pub fn hug<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<CardEvent>) -> BurstId {
        let burst = BurstId(self.next_burst);
        self.next_burst += 1;

        let items = hug_burst(rng, burst);
        let count = items.len();
        self.bursts.extend(items);
        self.hugs += 1;
        self.timers.after(BURST_LIFETIME_MS, FinaleTimer::ExpireBurst(burst));
        events.push(CardEvent::HugBurst {
            burst,
            items: count,
            hugs: self.hugs,
        });

        if self.hugs >= HUG_THRESHOLD && !self.farewell_triggered {
            self.farewell_triggered = true;
            self.timers.after(FAREWELL_DELAY_MS, FinaleTimer::RevealFarewell);
            events.push(CardEvent::FarewellScheduled);
            log::debug!("final: farewell armed on hug {}", self.hugs);
        }
        burst
    }

    pub fn step<R: Rng>(&mut self, dt_ms: u64, rng: &mut R, events: &mut Vec<CardEvent>) {
        let until = self.timers.now_ms() + dt_ms;
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                FinaleTimer::ExpireBurst(burst) => {
                    self.bursts.retain(|item| item.burst != burst);
                    events.push(CardEvent::BurstExpired(burst));
                }
                FinaleTimer::RevealFarewell => {
                    if self.farewell_shown {
                        continue;
                    }
                    self.farewell_shown = true;
                    events.push(CardEvent::FarewellRevealed);

                    self.confetti = confetti(rng);
                    self.timers.after(CONFETTI_LIFETIME_MS, FinaleTimer::ClearConfetti);
                    events.push(CardEvent::ConfettiFired);
                }
                FinaleTimer::ClearConfetti => {
                    self.confetti.clear();
                    events.push(CardEvent::ConfettiCleared);
                }
            }
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
    use crate::consts::{BURST_MAX_ITEMS, BURST_MIN_ITEMS, CONFETTI_PIECES};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn count(events: &[CardEvent], pred: impl Fn(&CardEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(*e)).count()
    }

    fn live_bursts(stage: &FinaleStage) -> Vec<BurstId> {
        stage.bursts().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_farewell_on_third_hug_only() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();
        let mut stage = FinaleStage::new();

        stage.hug(&mut rng, &mut events);
        stage.hug(&mut rng, &mut events);
        assert!(!stage.farewell_triggered());
        stage.step(5_000, &mut rng, &mut events);
        assert!(!stage.farewell_shown());

        stage.hug(&mut rng, &mut events);
        assert!(stage.farewell_triggered());
        assert!(!stage.farewell_shown());

        stage.step(FAREWELL_DELAY_MS - 1, &mut rng, &mut events);
        assert!(!stage.farewell_shown());
        stage.step(1, &mut rng, &mut events);
        assert!(stage.farewell_shown());

        // A 4th and 5th hug still burst but never re-arm the farewell
        stage.hug(&mut rng, &mut events);
        stage.hug(&mut rng, &mut events);
        stage.step(10_000, &mut rng, &mut events);
        assert_eq!(stage.hugs(), 5);
        assert_eq!(count(&events, |e| matches!(e, CardEvent::FarewellScheduled)), 1);
        assert_eq!(count(&events, |e| matches!(e, CardEvent::FarewellRevealed)), 1);
        assert_eq!(count(&events, |e| matches!(e, CardEvent::ConfettiFired)), 1);
    }

    #[test]
    fn test_fourth_hug_before_reveal_does_not_reschedule() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();
        let mut stage = FinaleStage::new();
        for _ in 0..3 {
            stage.hug(&mut rng, &mut events);
        }
        // 3 burst expiries + 1 farewell
        assert_eq!(stage.pending_timers(), 4);
        stage.hug(&mut rng, &mut events);
        assert_eq!(stage.pending_timers(), 5);
        assert_eq!(count(&events, |e| matches!(e, CardEvent::FarewellScheduled)), 1);
    }

    #[test]
    fn test_bursts_expire_by_identity() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut events = Vec::new();
        let mut stage = FinaleStage::new();

        let first = stage.hug(&mut rng, &mut events);
        stage.step(1_500, &mut rng, &mut events);
        let second = stage.hug(&mut rng, &mut events);
        assert_eq!(live_bursts(&stage), vec![first, second]);

        stage.step(500, &mut rng, &mut events);
        assert_eq!(live_bursts(&stage), vec![second]);
        let (_, items) = stage.bursts().next().unwrap();
        assert!((BURST_MIN_ITEMS..=BURST_MAX_ITEMS).contains(&items.len()));

        stage.step(1_500, &mut rng, &mut events);
        assert_eq!(stage.bursts().count(), 0);
    }

    #[test]
    fn test_confetti_lifetime() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut stage = FinaleStage::new();
        for _ in 0..3 {
            stage.hug(&mut rng, &mut events);
        }
        stage.step(FAREWELL_DELAY_MS, &mut rng, &mut events);
        assert_eq!(stage.confetti().len(), CONFETTI_PIECES);
        stage.step(CONFETTI_LIFETIME_MS, &mut rng, &mut events);
        assert!(stage.confetti().is_empty());
        assert_eq!(count(&events, |e| matches!(e, CardEvent::ConfettiCleared)), 1);
    }

    #[test]
    fn test_hearts_capped() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut stage = FinaleStage::new();
        for _ in 0..14 {
            stage.hug(&mut rng, &mut events);
        }
        assert_eq!(stage.hearts(), HUG_HEARTS_MAX);
    }
}
