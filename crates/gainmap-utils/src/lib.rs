//! # `gainmap_utils`
//!
//! Small utility types shared between the audio and UI sides of a `gainmap` parameter.

#![warn(missing_docs)]

pub mod atomic_f32;

pub use atomic_f32::*;
