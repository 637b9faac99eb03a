#![allow(dead_code)]
#![allow(unused_variables)]
#![allow(non_upper_case_globals)]
pub mod envelope;
pub mod filter;
pub mod mix;
pub mod pitch;
pub mod render;
pub mod sound;
pub mod synth;
pub mod time;
pub mod tone;
pub mod types;
