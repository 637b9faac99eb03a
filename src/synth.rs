/// This module provides the settings for the synthesis engine.
/// It includes the default Sample Rate, the Nyquist Frequency,
/// the minimum supported oscillator frequency, and reference pitch constants.
///
/// The module also offers convenient aliases for standard constants at f32 precision.
use crate::types::*;

pub const pi: f32 = std::f32::consts::PI;
pub const pi2: f32 = pi * 2f32;

pub use crate::types::{Sample, SampleBuffer};

/// Default sampling rate in samples per second.
pub const SR: usize = 44100;
pub const SRi: i32 = SR as i32;
pub const SRf: f32 = SR as f32;
pub const SRu: u32 = SR as u32;

// Nyquist Frequency: Maximum renderable frequency at the default rate
pub const NF: usize = SR / 2;
pub const NFf: f32 = SR as f32 / 2f32;

/// Minimum Frequency: floor applied to envelope-driven oscillator and
/// filter center frequencies. An aggressive frequency envelope can ramp
/// through zero into negative values; everything downstream divides by or
/// wraps on the current frequency, so it is clamped here instead.
pub const MIN_FREQ: f32 = 0.001f32;

/// The frequency of the A above middle C, the reference for note 0.
pub const BASE_FREQUENCY: f32 = 440f32;

/// Number of equal-tempered semitones in an octave.
pub const SEMITONES_PER_OCTAVE: f32 = 12f32;
