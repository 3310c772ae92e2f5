//! Flip cards scene: six wish cards, tap to turn over

use super::state::CardEvent;

/// A wish card's two faces
#[derive(Debug, Clone, Copy)]
pub struct WishCard {
    pub front: &'static str,
    pub message: &'static str,
}

pub const WISH_CARDS: [WishCard; 6] = [
    WishCard { front: "🤍", message: "Love you" },
    WishCard { front: "🌱", message: "Always rooting for you" },
    WishCard { front: "✨", message: "You make life brighter" },
    WishCard { front: "🫶", message: "Never stop being you" },
    WishCard { front: "🌈", message: "Dream big this year" },
    WishCard { front: "🎯", message: "You've got this" },
];

/// Reveal stage of the flip cards scene
#[derive(Debug, Clone, Default)]
pub struct FlipCardsStage {
    flipped: [bool; WISH_CARDS.len()],
}

impl FlipCardsStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.get(index).copied().unwrap_or(false)
    }

    /// Turn a card over (either way)
    pub fn flip(&mut self, index: usize, events: &mut Vec<CardEvent>) -> bool {
        let Some(card) = self.flipped.get_mut(index) else {
            log::warn!("flip_cards: no card at index {}", index);
            return false;
        };
        *card = !*card;
        events.push(CardEvent::CardFlipped {
            index,
            face_up: *card,
        });
        true
    }
}
