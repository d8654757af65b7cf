//! Audio system using Web Audio API
//!
//! Procedurally generated tones, no external files. Audio is best effort:
//! if the context cannot be created or a node fails, the game stays silent.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Run ended on an obstacle
    Collision,
}

/// A single sine blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    /// Starting gain before volume scaling
    pub gain: f32,
}

/// Gain the envelope decays to
pub const RELEASE_GAIN: f32 = 0.01;

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Jump => Tone {
                frequency: 600.0,
                duration: 0.1,
                gain: 0.3,
            },
            SoundEffect::Collision => Tone {
                frequency: 200.0,
                duration: 0.2,
                gain: 0.3,
            },
        }
    }
}

/// Volume state shared by both backends
#[derive(Debug, Clone, Copy, PartialEq)]
struct Mixer {
    volume: f32,
}

impl Mixer {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
        }
    }

    fn effective_volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Mixer, RELEASE_GAIN, SoundEffect, Tone};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        mixer: Mixer,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                mixer: Mixer::from_settings(settings),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.mixer = Mixer::from_settings(settings);
        }

        pub fn effective_volume(&self) -> f32 {
            self.mixer.effective_volume()
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = self.mixer.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            log::debug!("Playing {:?}", effect);
            play_tone(ctx, effect.tone(), vol);
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
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

    fn play_tone(ctx: &AudioContext, tone: Tone, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, tone.frequency, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(tone.gain * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(RELEASE_GAIN, t + tone.duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + tone.duration).ok();
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::{Mixer, SoundEffect};
    use crate::settings::Settings;

    /// Silent stand-in; records cues in the debug log
    pub struct AudioManager {
        mixer: Mixer,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            Self {
                mixer: Mixer::from_settings(settings),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.mixer = Mixer::from_settings(settings);
        }

        pub fn effective_volume(&self) -> f32 {
            self.mixer.effective_volume()
        }

        pub fn resume(&self) {}

        pub fn play(&self, effect: SoundEffect) {
            if self.mixer.effective_volume() > 0.0 {
                log::debug!("Sound cue {:?} ({} Hz)", effect, effect.tone().frequency);
            }
        }
    }
}

pub use backend::AudioManager;
