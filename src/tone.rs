//! Tone generation.
//!
//! A [`Tone`] is set up as if it were an instrument playing one note: a
//! waveform, an amplitude, a duration, and optional envelopes shaping the
//! amplitude and frequency over the tone's length. Generation is lazy: each
//! call to [`Tone::generate`] yields a fresh run of integer samples from
//! phase 0, threading the oscillator phase from sample to sample inside the
//! run and nowhere else.

use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};

use crate::envelope::EnvelopeCurve;
use crate::pitch::note_to_freq;
use crate::sound::Sound;
use crate::synth::{pi2, MIN_FREQ};
use crate::time;
use crate::types::{Ampl, Freq, Radian, Sample, SampleBuffer};

/// The tone kinds. Pitched variants carry their nominal frequency, derived
/// from a note number once at construction; noise has no pitch at all.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Waveform {
    Sine { frequency: Freq },
    Square { frequency: Freq },
    HarmonicSaw { frequency: Freq, levels: usize },
    Noise,
}

impl Waveform {
    /// Nominal frequency in Hz. None for noise.
    pub fn frequency(&self) -> Option<Freq> {
        match *self {
            Waveform::Sine { frequency } => Some(frequency),
            Waveform::Square { frequency } => Some(frequency),
            Waveform::HarmonicSaw { frequency, .. } => Some(frequency),
            Waveform::Noise => None,
        }
    }

    /// Number of oscillator phase accumulators a generation run needs.
    fn voices(&self) -> usize {
        match *self {
            Waveform::HarmonicSaw { levels, .. } => levels,
            Waveform::Noise => 0,
            _ => 1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tone<'a> {
    pub waveform: Waveform,
    pub amplitude: Ampl,
    pub seconds: f32,
    pub amplitude_env: Option<&'a EnvelopeCurve>,
    pub frequency_env: Option<&'a EnvelopeCurve>,
}

impl<'a> Tone<'a> {
    pub fn sine(note: f32, amplitude: Ampl, seconds: f32) -> Tone<'a> {
        Tone {
            waveform: Waveform::Sine { frequency: note_to_freq(note) },
            amplitude,
            seconds,
            amplitude_env: None,
            frequency_env: None,
        }
    }

    pub fn square(note: f32, amplitude: Ampl, seconds: f32) -> Tone<'a> {
        Tone {
            waveform: Waveform::Square { frequency: note_to_freq(note) },
            amplitude,
            seconds,
            amplitude_env: None,
            frequency_env: None,
        }
    }

    /// A sawtooth approximated by `levels` harmonic sine waves, each at a
    /// multiple of the fundamental and attenuated by its harmonic number.
    pub fn harmonic_saw(note: f32, amplitude: Ampl, seconds: f32, levels: usize) -> Tone<'a> {
        if levels == 0 {
            panic!("HarmonicSaw requires at least one harmonic level")
        }
        Tone {
            waveform: Waveform::HarmonicSaw { frequency: note_to_freq(note), levels },
            amplitude,
            seconds,
            amplitude_env: None,
            frequency_env: None,
        }
    }

    pub fn noise(amplitude: Ampl, seconds: f32) -> Tone<'a> {
        Tone {
            waveform: Waveform::Noise,
            amplitude,
            seconds,
            amplitude_env: None,
            frequency_env: None,
        }
    }

    /// Attach a shared amplitude envelope. Note: noise generation reads the
    /// raw amplitude and leaves this envelope unapplied.
    pub fn with_amplitude_env(mut self, env: &'a EnvelopeCurve) -> Tone<'a> {
        self.amplitude_env = Some(env);
        self
    }

    pub fn with_frequency_env(mut self, env: &'a EnvelopeCurve) -> Tone<'a> {
        self.frequency_env = Some(env);
        self
    }

    /// Start one generation run at the given sampling rate.
    ///
    /// The returned iterator is finite and not restartable; every call to
    /// `generate` begins a new run from phase 0 with its own phase state, so
    /// independent runs never interfere.
    pub fn generate(&self, sample_rate: usize) -> ToneIter<'_> {
        let n_samples = time::samples_from_seconds(sample_rate, self.seconds);
        ToneIter {
            tone: self,
            sample_rate,
            n_samples,
            index: 0,
            phases: vec![0f32; self.waveform.voices()],
            rng: thread_rng(),
        }
    }

    /// Generate the tone and collect one full run.
    pub fn render(&self, sample_rate: usize) -> SampleBuffer {
        self.generate(sample_rate).collect()
    }

    /// Append the tone to the end of a sound buffer.
    pub fn add_to<S: Sound>(&self, sound: &mut S) {
        for sample in self.generate(sound.sampling_rate()) {
            sound.add_sample(sample);
        }
    }

    /// Layer the tone over a sound buffer starting at `start_seconds`.
    ///
    /// Samples that land inside the buffer are combined additively; once the
    /// tone outruns the buffer's current length the remainder is appended, so
    /// a tone longer than the buffer extends past its end.
    pub fn mix_into<S: Sound>(&self, sound: &mut S, start_seconds: f32) {
        let mut index = sound.seconds_to_samples(start_seconds);
        for sample in self.generate(sound.sampling_rate()) {
            if index < sound.num_samples() {
                sound.combine_sample_at_index(sample, index);
            } else {
                sound.add_sample(sample);
            }
            index += 1;
        }
    }

    /// The amplitude for one sample after the amplitude envelope, if any.
    fn amplitude_at(&self, sample_index: usize, n_samples: usize) -> Ampl {
        match self.amplitude_env {
            Some(env) => env.evaluate(self.amplitude, sample_index, n_samples),
            None => self.amplitude,
        }
    }

    /// The fundamental frequency for one sample after the frequency
    /// envelope, clamped away from zero and negative values.
    fn frequency_at(&self, fundamental: Freq, sample_index: usize, n_samples: usize) -> Freq {
        let freq = match self.frequency_env {
            Some(env) => env.evaluate(fundamental, sample_index, n_samples),
            None => fundamental,
        };
        freq.max(MIN_FREQ)
    }
}

/// One generation run: a lazy, finite sequence of integer samples.
pub struct ToneIter<'a> {
    tone: &'a Tone<'a>,
    sample_rate: usize,
    n_samples: usize,
    index: usize,
    phases: Vec<Radian>,
    rng: ThreadRng,
}

impl<'a> ToneIter<'a> {
    /// Advance the phase accumulator in `slot` by one sample of `harmonic`
    /// times the enveloped fundamental, returning the new sine value.
    fn advance_phase(&mut self, slot: usize, fundamental: Freq, harmonic: usize, sample_index: usize) -> f32 {
        let frequency = self.tone.frequency_at(fundamental, sample_index, self.n_samples) * harmonic as f32;
        let samples_per_cycle = self.sample_rate as f32 / frequency;
        let phase_increment = pi2 / samples_per_cycle;
        self.phases[slot] += phase_increment;
        self.phases[slot].sin()
    }
}

impl<'a> Iterator for ToneIter<'a> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.index >= self.n_samples {
            return None;
        }
        let i = self.index;
        self.index += 1;

        let sample = match self.tone.waveform {
            Waveform::Sine { frequency } => {
                let amplitude = self.tone.amplitude_at(i, self.n_samples);
                let sine = self.advance_phase(0, frequency, 1, i);
                (sine * amplitude).round() as Sample
            }
            Waveform::Square { frequency } => {
                let amplitude = self.tone.amplitude_at(i, self.n_samples);
                let sine = self.advance_phase(0, frequency, 1, i);
                // sign(0) stays 0 to avoid a spurious click at the crossing
                if sine == 0f32 {
                    0
                } else {
                    (amplitude * sine.signum()).round() as Sample
                }
            }
            Waveform::HarmonicSaw { frequency, levels } => {
                let amplitude = self.tone.amplitude_at(i, self.n_samples);
                let mut value = 0f32;
                for harmonic in 1..=levels {
                    let sine = self.advance_phase(harmonic - 1, frequency, harmonic, i);
                    value += sine * amplitude / harmonic as f32;
                }
                value.round() as Sample
            }
            Waveform::Noise => (self.tone.amplitude * self.rng.gen_range(0f32..1f32)).round() as Sample,
        };
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_samples - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ToneIter<'a> {}
