//! Attack/decay/sustain/release curves applied to a tone's amplitude or frequency.
//!
//! A curve stores its phase lengths as proportions of a total sample count
//! supplied per call, so one instance is reusable across tones of any length
//! and may be shared by many concurrent generation runs.

use serde::{Deserialize, Serialize};

use crate::pitch::shift_semitones;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeKind {
    Amplitude,
    Frequency,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopePhase {
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvelopeCurve {
    pub kind: EnvelopeKind,
    /// Length of the attack as a proportion of the tone in [0, 1].
    pub attack: f32,
    /// Length of the decay as a proportion of the tone in [0, 1].
    pub decay: f32,
    /// The sustain target. Absolute value for Amplitude curves; a signed
    /// semitone offset from the base value for Frequency curves. 0 means
    /// "hold the caller's base value unchanged".
    pub sustain_level: f32,
    /// Length of the sustain as a proportion of the tone in [0, 1].
    pub sustain_length: f32,
    /// Length of the release as a proportion of the tone in [0, 1].
    pub release: f32,
}

impl EnvelopeCurve {
    /// Create a curve from phase proportions.
    ///
    /// Each proportion must be in [0, 1]. Their sum is deliberately not
    /// checked: callers may leave the curve covering less than the whole
    /// tone, and indices past the release boundary evaluate to 0.
    pub fn new(
        kind: EnvelopeKind,
        attack: f32,
        decay: f32,
        sustain_level: f32,
        sustain_length: f32,
        release: f32,
    ) -> EnvelopeCurve {
        for (name, p) in [
            ("attack", attack),
            ("decay", decay),
            ("sustain_length", sustain_length),
            ("release", release),
        ] {
            if !(0f32..=1f32).contains(&p) {
                panic!("Envelope {} must be a proportion in [0, 1], got {}", name, p)
            }
        }
        EnvelopeCurve {
            kind,
            attack,
            decay,
            sustain_level,
            sustain_length,
            release,
        }
    }

    /// Classify a sample position against the cumulative phase boundaries.
    ///
    /// A phase is chosen by the first boundary the index is strictly less
    /// than, so a zero-length phase is never selected. Returns None at or
    /// past the release boundary.
    pub fn phase_at(&self, sample_index: usize, n_samples: usize) -> Option<EnvelopePhase> {
        let n = n_samples as f32;
        let i = sample_index as f32;

        let attack_end = self.attack * n;
        let decay_end = attack_end + self.decay * n;
        let sustain_end = decay_end + self.sustain_length * n;
        let release_end = sustain_end + self.release * n;

        if i < attack_end {
            Some(EnvelopePhase::Attack)
        } else if i < decay_end {
            Some(EnvelopePhase::Decay)
        } else if i < sustain_end {
            Some(EnvelopePhase::Sustain)
        } else if i < release_end {
            Some(EnvelopePhase::Release)
        } else {
            None
        }
    }

    /// Return the enveloped value for one sample of a tone.
    ///
    /// `base_value` is the tone's nominal amplitude or frequency and
    /// `n_samples` the total length of the tone. Indices at or past the
    /// release boundary return 0, the value the release ramp converges to.
    ///
    /// Frequency curves never emit an exact 0 during the attack: the very
    /// first sample of a ramp from silence would otherwise be a 0 Hz tone,
    /// which divides the oscillator's samples-per-cycle by zero downstream.
    /// That sample is floored to a nominal 1 Hz instead.
    pub fn evaluate(&self, base_value: f32, sample_index: usize, n_samples: usize) -> f32 {
        let n = n_samples as f32;
        let i = sample_index as f32;

        let attack_samples = self.attack * n;
        let decay_samples = self.decay * n;
        let release_samples = self.release * n;
        let decay_start = attack_samples;
        let release_start = attack_samples + decay_samples + self.sustain_length * n;

        let sustain = self.sustain_target(base_value);

        match self.phase_at(sample_index, n_samples) {
            Some(EnvelopePhase::Attack) => {
                if attack_samples <= 0f32 {
                    // degenerate zero-length phase: hold the boundary value
                    return base_value;
                }
                let value = base_value * (i / attack_samples);
                if self.kind == EnvelopeKind::Frequency && value == 0f32 {
                    1f32
                } else {
                    value
                }
            }
            Some(EnvelopePhase::Decay) => {
                if decay_samples <= 0f32 {
                    return sustain;
                }
                let value = base_value * (1f32 - (i - decay_start) / decay_samples);
                // ramp toward the sustain target but never under it
                value.max(sustain)
            }
            Some(EnvelopePhase::Sustain) => sustain,
            Some(EnvelopePhase::Release) => {
                if release_samples <= 0f32 {
                    return 0f32;
                }
                sustain * (1f32 - (i - release_start) / release_samples)
            }
            None => 0f32,
        }
    }

    /// Resolve the sustain target against a base value.
    ///
    /// Amplitude curves use `sustain_level` literally; Frequency curves read
    /// it as a semitone offset from the base frequency. 0 means the base
    /// value for both kinds.
    fn sustain_target(&self, base_value: f32) -> f32 {
        if self.sustain_level == 0f32 {
            return base_value;
        }
        match self.kind {
            EnvelopeKind::Amplitude => self.sustain_level,
            EnvelopeKind::Frequency => shift_semitones(base_value, self.sustain_level),
        }
    }
}
