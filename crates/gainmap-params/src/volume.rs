//! Volume curve: conversion between the host-facing normalized value and a linear gain.
//!
//! The decibel domain is skewed so that 0 dB sits in the middle of the normalized range, which gives attenuation
//! and boost the same amount of control travel. Decibel values at or below the off threshold mean silence.
//!
//! The free functions in this module use [`VolumeRange::DEFAULT`]; use a custom [`VolumeRange`] for other bounds.
use crate::mapping::{DecibelOff, Mapping, PivotSkew, Range};
use gainmap_math::range::normalize;
use thiserror::Error;

/// Lower bound of the decibel domain.
pub const VOLUME_MIN: f64 = -66.1;
/// Upper bound of the decibel domain.
pub const VOLUME_MAX: f64 = 35.0;
/// Decibel value at or below which the gain is forced to zero and the value displays as `OFF`.
pub const VOLUME_OFF_THRESHOLD: f64 = VOLUME_MIN + 0.1;

/// Error returned when constructing an invalid [`VolumeRange`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// One of the bounds is NaN or infinite.
    #[error("Volume range bounds must be finite")]
    NonFinite,
    /// The minimum is not strictly below the maximum.
    #[error("Volume range is empty or inverted: {min} dB..{max} dB")]
    Inverted {
        /// Requested minimum (dB)
        min: f64,
        /// Requested maximum (dB)
        max: f64,
    },
    /// 0 dB does not lie strictly inside the range, so the curve has nothing to pivot on.
    #[error("Volume range {min} dB..{max} dB does not contain 0 dB")]
    NoUnityGain {
        /// Requested minimum (dB)
        min: f64,
        /// Requested maximum (dB)
        max: f64,
    },
    /// The off threshold lies outside the range.
    #[error("Off threshold {threshold} dB is outside of {min} dB..{max} dB")]
    ThresholdOutOfRange {
        /// Requested off threshold (dB)
        threshold: f64,
        /// Range minimum (dB)
        min: f64,
        /// Range maximum (dB)
        max: f64,
    },
}

/// Bounds of a volume curve, in decibels.
///
/// All mapping operations are methods of this type. None of them clamp their input: out-of-range values extrapolate,
/// and clamping is left to the caller (see [`VolumeParam`](crate::param::VolumeParam)).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawVolumeRange", into = "RawVolumeRange")
)]
pub struct VolumeRange {
    min_db: f64,
    max_db: f64,
    off_threshold_db: f64,
}

impl Default for VolumeRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl VolumeRange {
    /// `-66.1 dB..=35 dB`, off at or below `-66 dB`.
    pub const DEFAULT: Self = Self {
        min_db: VOLUME_MIN,
        max_db: VOLUME_MAX,
        off_threshold_db: VOLUME_OFF_THRESHOLD,
    };

    /// Create a new volume range.
    ///
    /// # Arguments
    ///
    /// * `min_db`: Bottom of the curve (dB), must be negative
    /// * `max_db`: Top of the curve (dB), must be positive
    /// * `off_threshold_db`: Floor at or below which the output is silent, must be within `min_db..=max_db`
    pub fn new(min_db: f64, max_db: f64, off_threshold_db: f64) -> Result<Self, RangeError> {
        if !(min_db.is_finite() && max_db.is_finite() && off_threshold_db.is_finite()) {
            return Err(RangeError::NonFinite);
        }
        if min_db >= max_db {
            return Err(RangeError::Inverted {
                min: min_db,
                max: max_db,
            });
        }
        if !(min_db < 0.0 && 0.0 < max_db) {
            return Err(RangeError::NoUnityGain {
                min: min_db,
                max: max_db,
            });
        }
        if !(min_db..=max_db).contains(&off_threshold_db) {
            return Err(RangeError::ThresholdOutOfRange {
                threshold: off_threshold_db,
                min: min_db,
                max: max_db,
            });
        }
        Ok(Self {
            min_db,
            max_db,
            off_threshold_db,
        })
    }

    /// Return a copy of this range with a different off threshold.
    pub fn with_off_threshold(self, off_threshold_db: f64) -> Result<Self, RangeError> {
        Self::new(self.min_db, self.max_db, off_threshold_db)
    }

    /// Bottom of the curve (dB).
    pub const fn min_db(&self) -> f64 {
        self.min_db
    }

    /// Top of the curve (dB).
    pub const fn max_db(&self) -> f64 {
        self.max_db
    }

    /// Off threshold (dB).
    pub const fn off_threshold_db(&self) -> f64 {
        self.off_threshold_db
    }

    /// Returns true if `db` is at or below the off threshold.
    #[inline]
    pub fn is_off(&self, db: f64) -> bool {
        db <= self.off_threshold_db
    }

    /// Linear (unskewed) normalized position of 0 dB.
    pub fn zero_norm(&self) -> f64 {
        normalize(0.0, self.min_db, self.max_db)
    }

    /// Skew mapping, pivoting on [`Self::zero_norm`].
    pub fn skew_mapping(&self) -> PivotSkew {
        PivotSkew::new(self.zero_norm())
    }

    /// Decibel mapping: linear over the range, then skewed.
    pub fn db_mapping(&self) -> Range<PivotSkew> {
        Range {
            inner: self.skew_mapping(),
            min: self.min_db,
            max: self.max_db,
        }
    }

    /// Gain mapping: decibel conversion with the off floor, over [`Self::db_mapping`].
    pub fn gain_mapping(&self) -> DecibelOff<Range<PivotSkew>> {
        DecibelOff {
            inner: self.db_mapping(),
            off_threshold: self.off_threshold_db,
        }
    }

    /// Skew a linear normalized value so that 0 dB lands on `0.5`.
    pub fn skew(&self, normalized: f64) -> f64 {
        self.skew_mapping().normalize(normalized)
    }

    /// Inverse of [`Self::skew`].
    pub fn unskew(&self, skewed: f64) -> f64 {
        self.skew_mapping().denormalize(skewed)
    }

    /// Normalize a decibel value.
    pub fn normalize_db(&self, db: f64) -> f64 {
        self.db_mapping().normalize(db)
    }

    /// Decibel value of a normalized value. Inverse of [`Self::normalize_db`].
    pub fn denormalize_db(&self, normalized: f64) -> f64 {
        self.db_mapping().denormalize(normalized)
    }

    /// Normalize a linear gain. A gain of zero produces a non-finite result.
    pub fn normalize_volume(&self, gain: f64) -> f64 {
        self.gain_mapping().normalize(gain)
    }

    /// Linear gain of a normalized value; exactly zero at or below the off threshold.
    pub fn denormalize_volume(&self, normalized: f64) -> f64 {
        self.gain_mapping().denormalize(normalized)
    }
}

#[cfg(feature = "serialize")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawVolumeRange {
    min_db: f64,
    max_db: f64,
    off_threshold_db: f64,
}

#[cfg(feature = "serialize")]
impl TryFrom<RawVolumeRange> for VolumeRange {
    type Error = RangeError;

    fn try_from(raw: RawVolumeRange) -> Result<Self, Self::Error> {
        Self::new(raw.min_db, raw.max_db, raw.off_threshold_db)
    }
}

#[cfg(feature = "serialize")]
impl From<VolumeRange> for RawVolumeRange {
    fn from(range: VolumeRange) -> Self {
        Self {
            min_db: range.min_db,
            max_db: range.max_db,
            off_threshold_db: range.off_threshold_db,
        }
    }
}

/// Skew a linear normalized value so that 0 dB lands on `0.5`.
pub fn skew(normalized: f64) -> f64 {
    VolumeRange::DEFAULT.skew(normalized)
}

/// Inverse of [`skew`].
pub fn unskew(skewed: f64) -> f64 {
    VolumeRange::DEFAULT.unskew(skewed)
}

/// Normalize a decibel value from [`VOLUME_MIN`]..=[`VOLUME_MAX`].
///
/// # Example
///
/// ```
/// use gainmap_params::volume::normalize_db;
///
/// assert_eq!(0.5, normalize_db(0.0));
/// assert_eq!(0.0, normalize_db(-66.1));
/// ```
pub fn normalize_db(db: f64) -> f64 {
    VolumeRange::DEFAULT.normalize_db(db)
}

/// Decibel value of a normalized value. Inverse of [`normalize_db`].
pub fn denormalize_db(normalized: f64) -> f64 {
    VolumeRange::DEFAULT.denormalize_db(normalized)
}

/// Normalize a linear gain.
pub fn normalize_volume(gain: f64) -> f64 {
    VolumeRange::DEFAULT.normalize_volume(gain)
}

/// Linear gain of a normalized value; exactly zero at or below [`VOLUME_OFF_THRESHOLD`].
///
/// # Example
///
/// ```
/// use gainmap_params::volume::denormalize_volume;
///
/// assert_eq!(0.0, denormalize_volume(0.0));
/// assert!((denormalize_volume(0.5) - 1.0).abs() < 1e-9);
/// ```
pub fn denormalize_volume(normalized: f64) -> f64 {
    VolumeRange::DEFAULT.denormalize_volume(normalized)
}
