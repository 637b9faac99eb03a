//! Rendering of multiple tones.
//!
//! A single tone or filter pass is strictly ordered (each sample depends on
//! the phase or delay memory left by the previous one) and is never split
//! across threads. Independent tones share no mutable state, so a batch of
//! them renders in parallel.

use rayon::prelude::*;

use crate::tone::Tone;
use crate::types::SampleBuffer;

/// Render each tone as its own generation run, in parallel across tones.
pub fn render_tones(sample_rate: usize, tones: &[Tone]) -> Vec<SampleBuffer> {
    tones.par_iter().map(|tone| tone.render(sample_rate)).collect()
}

/// Pad buffers to the longest and sum them into one.
pub fn overlay(buffers: Vec<SampleBuffer>) -> SampleBuffer {
    let max_length = buffers.iter().map(|b| b.len()).max().unwrap_or(0);
    let mut out = vec![0; max_length];
    for buffer in buffers {
        for (i, sample) in buffer.into_iter().enumerate() {
            out[i] += sample;
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::envelope::{EnvelopeCurve, EnvelopeKind};

    const RATE: usize = 8000;

    #[test]
    fn test_parallel_render_matches_sequential() {
        let env = EnvelopeCurve::new(EnvelopeKind::Amplitude, 0.1, 0.1, 5000.0, 0.6, 0.2);
        let tones = vec![
            Tone::sine(0.0, 10000.0, 0.2).with_amplitude_env(&env),
            Tone::square(-5.0, 8000.0, 0.3),
            Tone::harmonic_saw(7.0, 6000.0, 0.1, 5),
        ];
        let parallel = render_tones(RATE, &tones);
        let sequential: Vec<SampleBuffer> = tones.iter().map(|t| t.render(RATE)).collect();
        assert_eq!(parallel, sequential, "sharing an envelope across tones must not change any run");
    }

    #[test]
    fn test_overlay_of_one_buffer_is_identity() {
        let buffer = vec![5, -3, 7];
        assert_eq!(overlay(vec![buffer.clone()]), buffer);
    }

    #[test]
    fn test_overlay_pads_to_longest() {
        let mixed = overlay(vec![vec![1, 1, 1, 1], vec![10, 10]]);
        assert_eq!(mixed, vec![11, 11, 1, 1]);
    }

    #[test]
    fn test_overlay_of_nothing_is_empty() {
        assert_eq!(overlay(Vec::new()), Vec::<i32>::new());
    }
}
