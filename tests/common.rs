use tonegen::sound::Sound;
use tonegen::types::{Sample, SampleBuffer};

pub const TEST_RATE: usize = 8000;

/// Vec-backed stand-in for the external sound buffer collaborator.
pub struct MemorySound {
    sampling_rate: usize,
    pub samples: SampleBuffer,
}

impl MemorySound {
    pub fn new(sampling_rate: usize) -> MemorySound {
        MemorySound {
            sampling_rate,
            samples: Vec::new(),
        }
    }
}

impl Sound for MemorySound {
    fn sampling_rate(&self) -> usize {
        self.sampling_rate
    }

    fn num_samples(&self) -> usize {
        self.samples.len()
    }

    fn add_sample(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    fn combine_sample_at_index(&mut self, sample: Sample, index: usize) {
        self.samples[index] += sample;
    }
}
