//! Name entry scene

use crate::clamp_chars;
use crate::consts::MAX_NAME_CHARS;

/// Normalize a submitted name: trimmed, at most `MAX_NAME_CHARS` characters.
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(clamp_chars(trimmed, MAX_NAME_CHARS).to_string())
}

/// Text field contents while the visitor types
#[derive(Debug, Clone, Default)]
pub struct NameDraft {
    text: String,
}

impl NameDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft, clamped like the input field's max length
    pub fn edit(&mut self, text: &str) {
        self.text = clamp_chars(text, MAX_NAME_CHARS).to_string();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blank_names_rejected() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name("\t\n"), None);
    }

    #[test]
    fn test_name_trimmed_and_clamped() {
        assert_eq!(normalize_name("  Asha  ").as_deref(), Some("Asha"));
        let long = "A very very very long name exceeding thirty characters";
        assert_eq!(
            normalize_name(long).as_deref(),
            Some("A very very very long name exc")
        );
    }

    #[test]
    fn test_draft_clamps_and_gates_submit() {
        let mut draft = NameDraft::new();
        assert!(!draft.can_submit());
        draft.edit("  ");
        assert!(!draft.can_submit());
        draft.edit(&"x".repeat(40));
        assert_eq!(draft.text().chars().count(), MAX_NAME_CHARS);
        assert!(draft.can_submit());
    }

    proptest! {
        #[test]
        fn prop_normalized_name_is_prefix_of_trimmed(raw in "\\PC{0,60}") {
            match normalize_name(&raw) {
                None => prop_assert!(raw.trim().is_empty()),
                Some(name) => {
                    prop_assert!(name.chars().count() <= MAX_NAME_CHARS);
                    prop_assert!(raw.trim().starts_with(&name));
                    prop_assert!(!name.is_empty());
                }
            }
        }
    }
}
