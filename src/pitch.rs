//! Equal-tempered pitch math.

use crate::synth::{BASE_FREQUENCY, SEMITONES_PER_OCTAVE};
use crate::types::Freq;

/// Convert a note number to a frequency in Hz.
///
/// The A above middle C is note 0; each integer above or below is a semitone
/// above or below. Fractional notes select intervals smaller than a semitone.
pub fn note_to_freq(note: f32) -> Freq {
    BASE_FREQUENCY * 2f32.powf(note / SEMITONES_PER_OCTAVE)
}

/// Shift a frequency by a signed number of semitones.
pub fn shift_semitones(freq: Freq, semitones: f32) -> Freq {
    freq * 2f32.powf(semitones / SEMITONES_PER_OCTAVE)
}
