//! Envelope scene: tap to open, then the letter reveals itself in stages

use serde::{Deserialize, Serialize};

use super::state::CardEvent;
use super::timers::TimerSet;
use crate::consts::{
    ENVELOPE_BUTTON_DELAY_MS, ENVELOPE_GREETING_DELAY_MS, ENVELOPE_MESSAGE_DELAY_MS,
};

/// Staged parts of the letter, in reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeReveal {
    /// Personal headline with the visitor's name
    SpecialMessage,
    /// New Year greeting
    Greeting,
    /// Continue button
    Button,
}

/// Reveal stage of the envelope scene
#[derive(Debug)]
pub struct EnvelopeStage {
    opened: bool,
    message_shown: bool,
    greeting_shown: bool,
    button_shown: bool,
    timers: TimerSet<EnvelopeReveal>,
}

impl Default for EnvelopeStage {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeStage {
    pub fn new() -> Self {
        Self {
            opened: false,
            message_shown: false,
            greeting_shown: false,
            button_shown: false,
            timers: TimerSet::new("envelope"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn message_shown(&self) -> bool {
        self.message_shown
    }

    pub fn greeting_shown(&self) -> bool {
        self.greeting_shown
    }

    pub fn button_shown(&self) -> bool {
        self.button_shown
    }

    /// Click on the envelope. Only the first click does anything.
    pub fn open(&mut self, events: &mut Vec<CardEvent>) -> bool {
        if self.opened {
            return false;
        }
        self.opened = true;
        self.timers.after(ENVELOPE_MESSAGE_DELAY_MS, EnvelopeReveal::SpecialMessage);
        self.timers.after(ENVELOPE_GREETING_DELAY_MS, EnvelopeReveal::Greeting);
        self.timers.after(ENVELOPE_BUTTON_DELAY_MS, EnvelopeReveal::Button);
        events.push(CardEvent::EnvelopeOpened);
        true
    }

    pub fn step(&mut self, dt_ms: u64, events: &mut Vec<CardEvent>) {
        let until = self.timers.now_ms() + dt_ms;
        while let Some(reveal) = self.timers.pop_due(until) {
            let flag = match reveal {
                EnvelopeReveal::SpecialMessage => &mut self.message_shown,
                EnvelopeReveal::Greeting => &mut self.greeting_shown,
                EnvelopeReveal::Button => &mut self.button_shown,
            };
            if !*flag {
                *flag = true;
                events.push(CardEvent::EnvelopeRevealed(reveal));
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

    fn reveals(events: &[CardEvent]) -> Vec<EnvelopeReveal> {
        events
            .iter()
            .filter_map(|e| match e {
                CardEvent::EnvelopeRevealed(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_nothing_reveals_before_open() {
        let mut stage = EnvelopeStage::new();
        let mut events = Vec::new();
        stage.step(10_000, &mut events);
        assert!(events.is_empty());
        assert!(!stage.message_shown());
    }

    #[test]
    fn test_staged_reveal_timing() {
        let mut stage = EnvelopeStage::new();
        let mut events = Vec::new();
        stage.step(5_000, &mut events);
        assert!(stage.open(&mut events));

        stage.step(599, &mut events);
        assert!(!stage.message_shown());
        stage.step(1, &mut events);
        assert!(stage.message_shown());
        assert!(!stage.greeting_shown());

        stage.step(900, &mut events);
        assert!(stage.greeting_shown());
        assert!(!stage.button_shown());

        stage.step(800, &mut events);
        assert!(stage.button_shown());
        assert_eq!(
            reveals(&events),
            vec![
                EnvelopeReveal::SpecialMessage,
                EnvelopeReveal::Greeting,
                EnvelopeReveal::Button
            ]
        );
    }

    #[test]
    fn test_second_click_does_not_reschedule() {
        let mut stage = EnvelopeStage::new();
        let mut events = Vec::new();
        assert!(stage.open(&mut events));
        stage.step(1000, &mut events);
        assert!(!stage.open(&mut events));
        assert!(!stage.open(&mut events));
        // Greeting and button still pending, nothing added
        assert_eq!(stage.pending_timers(), 2);

        stage.step(10_000, &mut events);
        assert_eq!(reveals(&events).len(), 3);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, CardEvent::EnvelopeOpened))
                .count(),
            1
        );
    }
}
