//! Conversions between elapsed seconds and sample counts.
//!
//! Tone generation, filtering, and the sound buffer boundary must share one
//! rounding policy or their sample counts drift apart. This module is that
//! policy.

/// Given a duration in seconds and a sampling rate,
/// determine the number of samples required to recreate that duration of signal.
pub fn samples_from_seconds(sample_rate: usize, seconds: f32) -> usize {
    (seconds * sample_rate as f32).round() as usize
}

pub fn seconds_from_samples(sample_rate: usize, n_samples: usize) -> f32 {
    n_samples as f32 / sample_rate as f32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_samples_from_seconds_rounds() {
        assert_eq!(samples_from_seconds(8000, 1.0), 8000);
        assert_eq!(samples_from_seconds(8000, 0.5), 4000);
        // 0.00006 seconds at 8kHz is 0.48 samples; policy is round, not floor
        assert_eq!(samples_from_seconds(8000, 0.00006), 0);
        assert_eq!(samples_from_seconds(8000, 0.00007), 1);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let n = samples_from_seconds(44100, 2.25);
        let secs = seconds_from_samples(44100, n);
        assert_eq!(samples_from_seconds(44100, secs), n, "converting back must not drift");
    }
}
