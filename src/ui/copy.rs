//! Card copy and glyph tables

/// Hug burst glyphs, indexed by `BurstItem::glyph`
pub const HUG_GLYPHS: [&str; 10] = ["❤️", "🤗", "🌸", "🎁", "💖", "✨", "🦋", "🌟", "💝", "🎀"];

/// Firework colour classes, indexed by `Firework::color`
pub const FIREWORK_CLASSES: [&str; 5] =
    ["fw-coral", "fw-gold", "fw-rose", "fw-lavender", "fw-mint"];

/// Confetti colours, indexed by `ConfettiPiece::color`
pub const CONFETTI_COLORS: [&str; 9] = [
    "var(--coral)",
    "var(--rose)",
    "var(--gold)",
    "var(--mint)",
    "var(--lavender)",
    "#FF6B9D",
    "#FFD93D",
    "#6BCB77",
    "#4D96FF",
];

pub const LOADING_TITLE: &str = "Loading a little celebration for you…";
pub const ENVELOPE_HINT: &str = "Tap to open ✨";
pub const ENVELOPE_GREETING: &str = "🎉 Happy New Year 2026 🎉";
pub const FAREWELL_LINE: &str = "May 2026 bring you endless joy ✨";
pub const FAREWELL_SIGNATURE: &str = "With love 💝";

pub fn envelope_headline(name: &str) -> String {
    format!("Hey {name}! Something special awaits 🎁")
}

pub fn wish_line(name: &str) -> String {
    format!("Dear {name}, wishing you love, laughter, and beautiful surprises ✨")
}

pub fn hug_prompt(name: &str) -> String {
    format!("Tap for a virtual hug, {name} 🤗")
}

pub fn farewell_title(name: &str) -> String {
    format!("{name}, wishing you a year full of warmth and magic")
}
