//! Card presentation preferences
//!
//! Read once at startup from an inline JSON block in the host page. Nothing is
//! written back; the card keeps no state between visits.

use serde::{Deserialize, Serialize};

use crate::consts::{BURST_MAX_ITEMS, CONFETTI_PIECES, FIREWORK_MAX};
use crate::error::{CardError, CardResult};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum confetti pieces drawn for this preset
    pub fn max_confetti(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 60,
            QualityPreset::High => CONFETTI_PIECES,
        }
    }

    /// Maximum emoji drawn per hug burst
    pub fn max_burst_items(&self) -> usize {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => BURST_MAX_ITEMS,
        }
    }

    /// Maximum fireworks drawn at once
    pub fn max_fireworks(&self) -> usize {
        match self {
            QualityPreset::Low => 3,
            QualityPreset::Medium | QualityPreset::High => FIREWORK_MAX,
        }
    }
}

/// Card settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Hug bursts and firework particles
    pub particles: bool,
    /// Confetti cannon on the farewell
    pub confetti: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    /// Reduced motion (no bursts, no confetti)
    pub reduced_motion: bool,

    /// Fixed RNG seed, for reproducible decorations
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            confetti: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset skips the confetti storm
        if preset == QualityPreset::Low {
            self.confetti = false;
        }
    }

    /// Parse settings from JSON, validating ranges
    pub fn from_json(json: &str) -> CardResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> CardResult<()> {
        for (name, vol) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&vol) {
                return Err(CardError::settings(format!(
                    "{name} must be within 0.0..=1.0, got {vol}"
                )));
            }
        }
        Ok(())
    }

    /// Effective particle drawing (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective confetti (respects reduced_motion)
    pub fn effective_confetti(&self) -> bool {
        self.confetti && !self.reduced_motion
    }

    /// Burst items drawn per hug
    pub fn max_burst_items(&self) -> usize {
        if self.effective_particles() {
            self.quality.max_burst_items()
        } else {
            0
        }
    }

    /// Confetti pieces drawn on the farewell
    pub fn max_confetti(&self) -> usize {
        if self.effective_confetti() {
            self.quality.max_confetti()
        } else {
            0
        }
    }

    /// Fireworks drawn at once
    pub fn max_fireworks(&self) -> usize {
        if self.effective_particles() {
            self.quality.max_fireworks()
        } else {
            0
        }
    }

    /// Gain applied to every sound effect while unmuted
    pub fn sfx_gain(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
    }

    /// Id of the inline JSON block in the host page
    pub const ELEMENT_ID: &'static str = "card-settings";

    /// Load settings from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings (quality {})", settings.quality.as_str());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring card settings: {}", e);
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "high", "muted": true }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.muted);
        assert!(settings.particles);
        assert_eq!(settings.sfx_gain(), 0.8);
    }

    #[test]
    fn test_out_of_range_volume_rejected() {
        let err = Settings::from_json(r#"{ "master_volume": 1.5 }"#).unwrap_err();
        assert!(matches!(err, CardError::Settings(_)));
        assert!(err.to_string().contains("master_volume"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Settings::from_json("{ quality: ").unwrap_err();
        assert!(matches!(err, CardError::Json(_)));
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(settings.max_burst_items(), 0);
        assert_eq!(settings.max_confetti(), 0);
        assert_eq!(settings.max_fireworks(), 0);
    }

    #[test]
    fn test_low_preset() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.confetti);
        assert_eq!(settings.max_fireworks(), 3);
        assert_eq!(settings.max_burst_items(), 8);
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
    }
}
