//! Resonant filtering of sample streams.
//!
//! The filter is a biquad: five coefficients over a 4-slot delay memory of
//! input/output history. Only the peaking realization is built here; other
//! shapes from the same cookbook family slot in as further [`Coefficients`]
//! constructors. Variable names follow the Audio EQ Cookbook
//! (http://www.musicdsp.org/files/Audio-EQ-Cookbook.txt).

use crate::envelope::EnvelopeCurve;
use crate::synth::{pi2, MIN_FREQ};
use crate::types::{Freq, Sample, SampleBuffer};

/// Biquad coefficients, already normalized by `a0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub a1: f32,
    pub a2: f32,
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
}

impl Coefficients {
    /// Peaking EQ coefficients: boost or cut `gain` dB in a band of
    /// `bandwidth` octaves around `center_frequency`.
    ///
    /// The center frequency must lie strictly between 0 and the Nyquist
    /// frequency; `sin(w0)` is 0 at those edges and `alpha` is undefined
    /// there.
    pub fn peaking(center_frequency: Freq, bandwidth: f32, gain: f32, sample_rate: usize) -> Coefficients {
        let amp = 10f32.powf(gain / 40f32);
        let w0 = pi2 * center_frequency / sample_rate as f32;
        let w0_sine = w0.sin();
        let w0_cosine = w0.cos();
        let alpha = w0_sine * ((2f32.ln() / 2f32) * bandwidth * w0 / w0_sine).sinh();

        let a0 = 1f32 + alpha / amp;
        Coefficients {
            a1: (-2f32 * w0_cosine) / a0,
            a2: (1f32 - alpha / amp) / a0,
            b0: (1f32 + alpha * amp) / a0,
            b1: (-2f32 * w0_cosine) / a0,
            b2: (1f32 - alpha * amp) / a0,
        }
    }
}

/// Two samples each of input and output history.
#[derive(Clone, Copy, Debug, Default)]
struct DelayMemory {
    previous_input: Sample,
    second_previous_input: Sample,
    previous_output: Sample,
    second_previous_output: Sample,
}

/// A peaking biquad over one sample stream.
///
/// The delay memory and sample counter are per-stream state: one instance
/// serves one filtering pass at a time. Coefficients are a pure function of
/// the current (center frequency, bandwidth, gain, rate) and are recomputed
/// every sample, so a center frequency moved by the drive envelope is never
/// stale.
pub struct BiquadFilter<'a> {
    sampling_rate: usize,
    starting_frequency: Freq,
    center_frequency: Freq,
    bandwidth: f32,
    gain: f32,
    envelope: Option<&'a EnvelopeCurve>,
    memory: DelayMemory,
    sample_index: usize,
}

impl<'a> BiquadFilter<'a> {
    /// A peaking filter. `bandwidth` is in octaves and `gain` in dB; a
    /// frequency envelope, when given, sweeps the center frequency away from
    /// `starting_frequency` over the length of the stream.
    pub fn peaking(
        sampling_rate: usize,
        starting_frequency: Freq,
        bandwidth: f32,
        gain: f32,
        envelope: Option<&'a EnvelopeCurve>,
    ) -> BiquadFilter<'a> {
        BiquadFilter {
            sampling_rate,
            starting_frequency,
            center_frequency: starting_frequency,
            bandwidth,
            gain,
            envelope,
            memory: DelayMemory::default(),
            sample_index: 0,
        }
    }

    pub fn center_frequency(&self) -> Freq {
        self.center_frequency
    }

    /// Filter one sample. `n_samples` is the total length of the stream,
    /// used to position the drive envelope.
    ///
    /// The envelope moves the center frequency first, then the coefficients
    /// are derived for this sample, then the recurrence runs over the delay
    /// memory.
    pub fn process(&mut self, sample: Sample, n_samples: usize) -> Sample {
        if let Some(env) = self.envelope {
            self.center_frequency = env
                .evaluate(self.starting_frequency, self.sample_index, n_samples)
                .max(MIN_FREQ);
        }
        let c = Coefficients::peaking(self.center_frequency, self.bandwidth, self.gain, self.sampling_rate);

        let m = self.memory;
        let output = (c.b0 * sample as f32
            + c.b1 * m.previous_input as f32
            + c.b2 * m.second_previous_input as f32
            - c.a1 * m.previous_output as f32
            - c.a2 * m.second_previous_output as f32)
            .round() as Sample;

        self.memory.second_previous_input = m.previous_input;
        self.memory.previous_input = sample;
        self.memory.second_previous_output = m.previous_output;
        self.memory.previous_output = output;
        self.sample_index += 1;

        output
    }

    /// Filter a whole stream, using its length as the envelope total.
    pub fn apply(&mut self, samples: &[Sample]) -> SampleBuffer {
        let n_samples = samples.len();
        samples.iter().map(|&s| self.process(s, n_samples)).collect()
    }

    /// Zero the four delay slots without touching coefficients or the sample
    /// counter. Use when restarting a pass on a fresh stream.
    pub fn reset_memory(&mut self) {
        self.memory = DelayMemory::default();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::envelope::{EnvelopeCurve, EnvelopeKind};
    use crate::tone::Tone;

    const RATE: usize = 8000;

    #[test]
    fn test_zero_gain_is_identity() {
        let signal = Tone::sine(0.0, 10000.0, 0.25).render(RATE);
        let mut filter = BiquadFilter::peaking(RATE, 660.0, 1.0, 0.0, None);
        let filtered = filter.apply(&signal);
        assert_eq!(filtered, signal, "a 0 dB peaking filter must pass the stream unchanged");
    }

    #[test]
    fn test_zero_gain_identity_holds_for_any_bandwidth() {
        let signal = Tone::square(-7.0, 4000.0, 0.1).render(RATE);
        for bandwidth in [0.25, 1.0, 3.0] {
            let mut filter = BiquadFilter::peaking(RATE, 1200.0, bandwidth, 0.0, None);
            assert_eq!(filter.apply(&signal), signal, "bandwidth {} broke the 0 dB identity", bandwidth);
        }
    }

    #[test]
    fn test_boost_coefficients_exceed_unity() {
        let c = Coefficients::peaking(1000.0, 1.0, 6.0, RATE);
        assert!(c.b0 > 1.0, "a +6 dB peak must boost, got b0 = {}", c.b0);
        assert_eq!(c.a1, c.b1, "the peaking form shares its first-order terms");
    }

    #[test]
    fn test_reset_memory_reproduces_a_fresh_filter() {
        let mut impulse = vec![0; 64];
        impulse[0] = 10000;

        let mut fresh = BiquadFilter::peaking(RATE, 500.0, 1.0, 9.0, None);
        let expected = fresh.apply(&impulse);

        let mut reused = BiquadFilter::peaking(RATE, 500.0, 1.0, 9.0, None);
        let noise = Tone::noise(3000.0, 0.01).render(RATE);
        reused.apply(&noise);
        reused.reset_memory();
        let actual = reused.apply(&impulse);

        assert_eq!(actual, expected, "after reset_memory the impulse response must match a fresh filter");
    }

    #[test]
    fn test_envelope_sweeps_the_center_frequency() {
        let env = EnvelopeCurve::new(EnvelopeKind::Frequency, 0.5, 0.0, 0.0, 0.0, 0.5);
        let signal = Tone::sine(0.0, 10000.0, 0.25).render(RATE);
        let mut filter = BiquadFilter::peaking(RATE, 2000.0, 1.0, 6.0, Some(&env));
        let filtered = filter.apply(&signal);

        assert_eq!(filtered.len(), signal.len());
        assert!(
            filter.center_frequency() < 2000.0,
            "the release phase should have swept the center below its start, got {}",
            filter.center_frequency()
        );
    }

    #[test]
    fn test_boost_raises_energy_at_center() {
        let signal = Tone::sine(0.0, 10000.0, 0.5).render(RATE);
        let mut filter = BiquadFilter::peaking(RATE, 440.0, 1.0, 12.0, None);
        let filtered = filter.apply(&signal);

        let energy = |buf: &[Sample]| buf.iter().map(|&s| (s as f64).powi(2)).sum::<f64>();
        // skip the transient at the head of the pass
        assert!(
            energy(&filtered[400..]) > energy(&signal[400..]),
            "a +12 dB peak at the tone's own frequency must add energy"
        );
    }
}
