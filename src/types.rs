pub type Freq = f32;
pub type Ampl = f32;
pub type Radian = f32;

/// One digital audio sample in the integer domain.
pub type Sample = i32;

/// Integer sample values, one channel.
pub type SampleBuffer = Vec<Sample>;
