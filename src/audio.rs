//! Audio cues using Web Audio API
//!
//! Procedurally generated chimes and pops - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{CardEvent, EnvelopeReveal};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Any scene change
    SceneChange,
    /// Envelope flap opens
    EnvelopeOpen,
    /// A staged letter line appears
    Reveal,
    /// Firework pops in the wish scene
    Firework,
    /// Sticker comes alive
    StickerPop,
    /// Wish card turns over
    CardFlip,
    /// Hug burst
    Hug,
    /// Farewell message
    Farewell,
    /// Empty name submitted
    Rejected,
}

impl SoundEffect {
    /// Cue for a session event, if it has one
    pub fn for_event(event: &CardEvent) -> Option<Self> {
        match event {
            CardEvent::SceneEntered(_) => Some(SoundEffect::SceneChange),
            CardEvent::EnvelopeOpened => Some(SoundEffect::EnvelopeOpen),
            CardEvent::EnvelopeRevealed(EnvelopeReveal::Button) => None,
            CardEvent::EnvelopeRevealed(_) => Some(SoundEffect::Reveal),
            CardEvent::FireworkLaunched(_) => Some(SoundEffect::Firework),
            CardEvent::StickerAnimated { .. } => Some(SoundEffect::StickerPop),
            CardEvent::CardFlipped { .. } => Some(SoundEffect::CardFlip),
            CardEvent::HugBurst { .. } => Some(SoundEffect::Hug),
            CardEvent::FarewellRevealed => Some(SoundEffect::Farewell),
            CardEvent::NameRejected => Some(SoundEffect::Rejected),
            _ => None,
        }
    }
}

/// Audio manager for the card
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Effect gain while unmuted
    gain: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            gain: settings.sfx_gain(),
            muted: settings.muted,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.gain }
    }

    /// Play the cues for a batch of session events
    pub fn play_events(&self, events: &[CardEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::SceneChange => self.play_scene_change(ctx, vol),
            SoundEffect::EnvelopeOpen => self.play_envelope_open(ctx, vol),
            SoundEffect::Reveal => self.play_reveal(ctx, vol),
            SoundEffect::Firework => self.play_firework(ctx, vol),
            SoundEffect::StickerPop => self.play_sticker_pop(ctx, vol),
            SoundEffect::CardFlip => self.play_card_flip(ctx, vol),
            SoundEffect::Hug => self.play_hug(ctx, vol),
            SoundEffect::Farewell => self.play_farewell(ctx, vol),
            SoundEffect::Rejected => self.play_rejected(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short rising blip shared by several cues
    fn play_sweep(&self, ctx: &AudioContext, vol: f32, from: f32, to: f32, secs: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + secs)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + secs)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + secs + 0.05).ok();
    }

    /// Arpeggio of short notes
    fn play_notes(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], spacing: f64, length: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + length)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + length + 0.05).ok();
            }
        }
    }

    /// Scene change - soft whoosh up
    fn play_scene_change(&self, ctx: &AudioContext, vol: f32) {
        self.play_sweep(ctx, vol * 0.2, 300.0, 600.0, 0.2);
    }

    /// Envelope open - paper rustle (noisy saw drop)
    fn play_envelope_open(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Reveal - sparkly two-note chime
    fn play_reveal(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(ctx, vol * 0.25, &[880.0, 1320.0], 0.08, 0.25);
    }

    /// Firework - low thump
    fn play_firework(&self, ctx: &AudioContext, vol: f32) {
        self.play_sweep(ctx, vol * 0.2, 220.0, 50.0, 0.3);
    }

    /// Sticker - bubbly pop
    fn play_sticker_pop(&self, ctx: &AudioContext, vol: f32) {
        self.play_sweep(ctx, vol * 0.3, 400.0, 1200.0, 0.08);
    }

    /// Card flip - quick tick
    fn play_card_flip(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.08, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.07).ok();
    }

    /// Hug - warm major triad
    fn play_hug(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(ctx, vol * 0.25, &[523.0, 659.0, 784.0], 0.06, 0.3);
    }

    /// Farewell - celebratory fanfare
    fn play_farewell(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(
            ctx,
            vol * 0.3,
            &[523.0, 659.0, 784.0, 1047.0, 1319.0],
            0.1,
            0.4,
        );
    }

    /// Rejected - short low buzz
    fn play_rejected(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(ctx, vol * 0.2, &[220.0, 180.0], 0.1, 0.12);
    }
}
