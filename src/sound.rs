//! Boundary with the sample-buffer collaborator.
//!
//! Storage of generated samples is not this crate's concern; anything that
//! can receive samples implements [`Sound`]. The trait is the whole contract:
//! a fixed sampling rate, the current length, append, and additive combine at
//! an existing index. Persistence and formats stay on the collaborator's side.

use crate::time;
use crate::types::Sample;

pub trait Sound {
    /// Samples per second, fixed for the life of the buffer.
    fn sampling_rate(&self) -> usize;

    /// Number of samples currently held.
    fn num_samples(&self) -> usize;

    /// Append one sample to the end.
    fn add_sample(&mut self, sample: Sample);

    /// Additively combine a sample with the one already at `index`.
    /// Callers must keep `index` under `num_samples`.
    fn combine_sample_at_index(&mut self, sample: Sample, index: usize);

    /// Convert elapsed seconds to a sample count at this buffer's rate,
    /// using the crate-wide rounding policy.
    fn seconds_to_samples(&self, seconds: f32) -> usize {
        time::samples_from_seconds(self.sampling_rate(), seconds)
    }
}
