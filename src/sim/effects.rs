//! Decorative particle generators
//!
//! Pure functions of the session RNG. Only counts and identities matter to
//! the sequencing; the values themselves are just for looks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{BURST_MAX_ITEMS, BURST_MIN_ITEMS, CONFETTI_PIECES};

/// Number of glyphs a hug burst picks from
pub const HUG_GLYPH_COUNT: u8 = 10;
/// Number of firework colours
pub const FIREWORK_COLOR_COUNT: u8 = 5;
/// Number of confetti colours
pub const CONFETTI_COLOR_COUNT: u8 = 9;

/// Identity shared by every item of one hug burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BurstId(pub u32);

/// One emoji flying out of a hug burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstItem {
    pub burst: BurstId,
    /// Glyph index into the hug glyph table
    pub glyph: u8,
    /// Spawn point, percent of the viewport
    pub origin: Vec2,
    /// Flight direction (degrees), spread evenly around the burst
    pub angle_deg: f32,
    /// Flight distance (px)
    pub distance: f32,
}

impl BurstItem {
    /// Final displacement from `origin` (px), with a slight upward lift
    pub fn offset(&self) -> Vec2 {
        let rad = self.angle_deg.to_radians();
        Vec2::new(rad.cos() * self.distance, rad.sin() * self.distance - 50.0)
    }
}

/// Generate one hug burst of `BURST_MIN_ITEMS..=BURST_MAX_ITEMS` items
pub fn hug_burst<R: Rng>(rng: &mut R, burst: BurstId) -> Vec<BurstItem> {
    let count = rng.random_range(BURST_MIN_ITEMS..=BURST_MAX_ITEMS);
    (0..count)
        .map(|i| BurstItem {
            burst,
            glyph: rng.random_range(0..HUG_GLYPH_COUNT),
            origin: Vec2::new(
                45.0 + rng.random::<f32>() * 10.0,
                40.0 + rng.random::<f32>() * 10.0,
            ),
            angle_deg: i as f32 / count as f32 * 360.0,
            distance: 100.0 + rng.random::<f32>() * 150.0,
        })
        .collect()
}

/// A firework in the wish scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firework {
    pub id: u32,
    /// Centre, percent of the viewport
    pub pos: Vec2,
    pub color: u8,
}

pub fn firework<R: Rng>(rng: &mut R, id: u32) -> Firework {
    Firework {
        id,
        pos: Vec2::new(
            10.0 + rng.random::<f32>() * 80.0,
            10.0 + rng.random::<f32>() * 50.0,
        ),
        color: rng.random_range(0..FIREWORK_COLOR_COUNT),
    }
}

/// A falling confetti piece
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiPiece {
    /// Horizontal start, percent of the viewport
    pub x: f32,
    pub color: u8,
    /// Launch delay (seconds)
    pub delay: f32,
    /// Initial rotation (degrees)
    pub rotation: f32,
    /// Width (px); height is 60% of it
    pub size: f32,
    /// Sideways drift over the fall (px)
    pub drift: f32,
    /// Fall duration (seconds)
    pub duration: f32,
}

pub fn confetti<R: Rng>(rng: &mut R) -> Vec<ConfettiPiece> {
    (0..CONFETTI_PIECES)
        .map(|_| ConfettiPiece {
            x: rng.random::<f32>() * 100.0,
            color: rng.random_range(0..CONFETTI_COLOR_COUNT),
            delay: rng.random::<f32>() * 0.5,
            rotation: rng.random::<f32>() * 360.0,
            size: 8.0 + rng.random::<f32>() * 8.0,
            drift: (rng.random::<f32>() - 0.5) * 200.0,
            duration: 3.0 + rng.random::<f32>() * 2.0,
        })
        .collect()
}
