use crate::types::SampleBuffer;

/// Additively layer rendered buffers onto a base signal.
///
/// Layers must fit inside the base signal; the integer sample domain is left
/// untouched otherwise, so headroom is the caller's concern.
pub fn combine(signal: &SampleBuffer, layers: Vec<SampleBuffer>) -> Result<SampleBuffer, &'static str> {
    let buffer_length = signal.len();

    if layers.iter().any(|l| l.len() > buffer_length) {
        return Err("Layers cannot be longer than the primary signal");
    }

    let mut combined = signal.clone();

    for layer in layers {
        for (i, sample) in layer.into_iter().enumerate().take(buffer_length) {
            combined[i] += sample;
        }
    }

    Ok(combined)
}
