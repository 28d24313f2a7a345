//! # `gainmap` Params
//!
//! Volume parameter for audio plugins: mapping between the normalized `0..=1` value a host sees and a linear gain,
//! through a decibel curve centered on 0 dB, plus the text shown to and typed in by the user.
//!
//! ```
//! use gainmap_params::param::{NormalizedParam, VolumeParam};
//!
//! let volume = VolumeParam::default();
//! assert!(volume.set_from_text("-6dB"));
//! assert_eq!("-6.0dB", volume.to_text(16));
//! assert!((volume.gain() - 0.501).abs() < 1e-3);
//!
//! volume.set_value(0.0);
//! assert_eq!(0.0, volume.gain());
//! assert_eq!("OFF", volume.to_text(16));
//! ```

#![warn(missing_docs)]

pub mod mapping;
pub mod param;
pub mod text;
pub mod volume;

pub use param::{NormalizedParam, VolumeParam};
pub use text::{format, parse, ParseVolumeError};
pub use volume::{
    denormalize_db, denormalize_volume, normalize_db, normalize_volume, skew, unskew, VolumeRange, VOLUME_MAX,
    VOLUME_MIN, VOLUME_OFF_THRESHOLD,
};
