//! Scene identifiers and the fixed running order

use serde::{Deserialize, Serialize};

/// One full-screen step of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneId {
    /// Progress bar
    Loading,
    /// Name entry form
    NameInput,
    /// Envelope with staged letter reveal
    Envelope,
    /// Fireworks and the personal wish
    Wish,
    /// Tappable stickers
    Sticker,
    /// Flip-to-read wish cards
    FlipCards,
    /// Hug button and farewell
    Final,
}

impl SceneId {
    /// Running order
    pub const ALL: [SceneId; 7] = [
        SceneId::Loading,
        SceneId::NameInput,
        SceneId::Envelope,
        SceneId::Wish,
        SceneId::Sticker,
        SceneId::FlipCards,
        SceneId::Final,
    ];

    /// The scene that follows this one. `Final` only leaves through restart.
    pub fn next(self) -> Option<SceneId> {
        match self {
            SceneId::Loading => Some(SceneId::NameInput),
            SceneId::NameInput => Some(SceneId::Envelope),
            SceneId::Envelope => Some(SceneId::Wish),
            SceneId::Wish => Some(SceneId::Sticker),
            SceneId::Sticker => Some(SceneId::FlipCards),
            SceneId::FlipCards => Some(SceneId::Final),
            SceneId::Final => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SceneId::Loading => "loading",
            SceneId::NameInput => "nameInput",
            SceneId::Envelope => "envelope",
            SceneId::Wish => "wish",
            SceneId::Sticker => "sticker",
            SceneId::FlipCards => "flipCards",
            SceneId::Final => "final",
        }
    }

    /// DOM id of the scene's container
    pub fn element_id(self) -> &'static str {
        match self {
            SceneId::Loading => "scene-loading",
            SceneId::NameInput => "scene-name",
            SceneId::Envelope => "scene-envelope",
            SceneId::Wish => "scene-wish",
            SceneId::Sticker => "scene-sticker",
            SceneId::FlipCards => "scene-flip-cards",
            SceneId::Final => "scene-final",
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_running_order() {
        let mut walked = vec![SceneId::Loading];
        let mut scene = SceneId::Loading;
        while let Some(next) = scene.next() {
            walked.push(next);
            scene = next;
        }
        assert_eq!(walked, SceneId::ALL);
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for scene in SceneId::ALL {
            let json = serde_json::to_string(&scene).unwrap();
            assert_eq!(json, format!("\"{}\"", scene.as_str()));
        }
    }
}
