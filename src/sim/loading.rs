//! Loading scene: progress bar that hands over to name entry on its own

use super::state::CardEvent;
use super::timers::{TimerId, TimerSet};
use crate::consts::{LOADING_COMPLETE_DELAY_MS, LOADING_INTERVAL_MS, LOADING_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadingTimer {
    Tick,
    Complete,
}

/// Reveal stage of the loading scene
#[derive(Debug)]
pub struct LoadingStage {
    progress: u8,
    interval: Option<TimerId>,
    completed: bool,
    timers: TimerSet<LoadingTimer>,
}

impl Default for LoadingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingStage {
    pub fn new() -> Self {
        let mut timers = TimerSet::new("loading");
        let interval = timers.every(LOADING_INTERVAL_MS, LoadingTimer::Tick);
        Self {
            progress: 0,
            interval: Some(interval),
            completed: false,
            timers,
        }
    }

    /// Progress in percent (0..=100)
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Advance by `dt_ms`. Returns true on the single step where loading
    /// completes.
    pub fn step(&mut self, dt_ms: u64, events: &mut Vec<CardEvent>) -> bool {
        let until = self.timers.now_ms() + dt_ms;
        while let Some(timer) = self.timers.pop_due(until) {
            match timer {
                LoadingTimer::Tick => self.on_tick(),
                LoadingTimer::Complete => {
                    if !self.completed {
                        self.completed = true;
                        events.push(CardEvent::LoadingComplete);
                        return true;
                    }
                }
            }
        }
        self.timers.settle(until);
        false
    }

    fn on_tick(&mut self) {
        self.progress = self.progress.saturating_add(LOADING_STEP).min(100);
        if self.progress < 100 {
            return;
        }
        // Stop the bar before arming completion so no later tick can re-arm it
        if let Some(interval) = self.interval.take() {
            self.timers.cancel(interval);
            self.timers.after(LOADING_COMPLETE_DELAY_MS, LoadingTimer::Complete);
            log::debug!("loading: bar full at {}ms", self.timers.now_ms());
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn teardown(&mut self) -> usize {
        self.interval = None;
        self.timers.cancel_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_steps_by_two_every_interval() {
        let mut stage = LoadingStage::new();
        let mut events = Vec::new();
        assert!(!stage.step(59, &mut events));
        assert_eq!(stage.progress(), 0);
        stage.step(1, &mut events);
        assert_eq!(stage.progress(), 2);
        stage.step(600, &mut events);
        assert_eq!(stage.progress(), 22);
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut stage = LoadingStage::new();
        let mut events = Vec::new();

        // 50 ticks fill the bar
        assert!(!stage.step(50 * LOADING_INTERVAL_MS, &mut events));
        assert_eq!(stage.progress(), 100);
        // Only the completion remains
        assert_eq!(stage.pending_timers(), 1);

        assert!(!stage.step(LOADING_COMPLETE_DELAY_MS - 1, &mut events));
        assert!(stage.step(1, &mut events));
        assert!(stage.is_complete());

        let mut fired = 1;
        for _ in 0..200 {
            if stage.step(LOADING_INTERVAL_MS, &mut events) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(stage.progress(), 100);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, CardEvent::LoadingComplete))
                .count(),
            1
        );
    }

    #[test]
    fn test_single_large_step_completes_once() {
        let mut stage = LoadingStage::new();
        let mut events = Vec::new();
        assert!(stage.step(60_000, &mut events));
        assert!(!stage.step(60_000, &mut events));
        assert_eq!(stage.pending_timers(), 0);
    }

    #[test]
    fn test_teardown_cancels_interval() {
        let mut stage = LoadingStage::new();
        let mut events = Vec::new();
        stage.step(300, &mut events);
        assert_eq!(stage.teardown(), 1);
        stage.step(10_000, &mut events);
        assert_eq!(stage.progress(), 10);
        assert!(!stage.is_complete());
    }
}
