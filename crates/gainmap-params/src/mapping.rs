//! Composable mappings from and to a normalized range.
//!
//! A host only ever sees parameter values in `0..=1`. A [`Mapping`] describes how such a normalized value relates to
//! the "real" value of the parameter. The volume curve is built by stacking three mappings:
//!
//! 1. [`PivotSkew`] gives each side of 0 dB half of the normalized range,
//! 2. [`Range`] stretches that onto the decibel domain,
//! 3. [`DecibelOff`] converts decibels to a linear gain, silencing everything at or below a floor.
use gainmap_math::range::{denormalize, normalize, remap};
use gainmap_math::{db_to_linear, db_to_linear_off, linear_to_db};
use std::ops;
use std::sync::Arc;

/// Mapping from and to a normalized range.
pub trait Mapping: Send + Sync {
    /// Normalize the value from the mapping entire range down to `0..1`.
    fn normalize(&self, value: f64) -> f64;
    /// Map the normalized value back from `0..1` to the mapping's entire range.
    fn denormalize(&self, value: f64) -> f64;
    /// Range of this mapping
    fn range(&self) -> ops::Range<f64>;
}

/// Extension methods for [`Mapping`] types
pub trait MappingExt: Sized + Mapping {
    /// Type-erase this mapping, turning it into a shared [`Arc`] containing the mapping
    #[inline]
    fn into_dyn(self) -> DynMapping
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<M: Mapping> MappingExt for M {}

/// Type of type-erased, owned mappings (returned by [`MappingExt::into_dyn`])
pub type DynMapping = Arc<dyn Mapping>;

/// Ranged mapping, which takes the inner mapping and maps it to this new range.
#[derive(Debug, Copy, Clone)]
pub struct Range<M> {
    /// Inner mapping
    pub inner: M,
    /// New minimum value
    pub min: f64,
    /// New maximum value
    pub max: f64,
}

impl<M: Mapping> Mapping for Range<M> {
    #[inline]
    fn normalize(&self, value: f64) -> f64 {
        self.inner.normalize(normalize(value, self.min, self.max))
    }

    #[inline]
    fn denormalize(&self, value: f64) -> f64 {
        denormalize(self.inner.denormalize(value), self.min, self.max)
    }

    fn range(&self) -> ops::Range<f64> {
        self.min..self.max
    }
}

/// Piecewise-linear skew of the `0..1` range around a pivot.
///
/// Normalizing sends `0..=pivot` to `0..=0.5` and `pivot..=1` to `0.5..=1`; denormalizing undoes it. The pivot
/// itself always lands exactly on `0.5`.
#[derive(Debug, Copy, Clone)]
pub struct PivotSkew {
    pivot: f64,
}

impl PivotSkew {
    /// Create a skew around `pivot`, which must lie strictly inside `0..1`.
    pub fn new(pivot: f64) -> Self {
        debug_assert!(pivot > 0.0 && pivot < 1.0, "Skew pivot {pivot} is outside of 0..1");
        Self { pivot }
    }

    /// Position in the unskewed range which maps to the middle of the skewed range.
    pub const fn pivot(&self) -> f64 {
        self.pivot
    }
}

impl Mapping for PivotSkew {
    fn normalize(&self, value: f64) -> f64 {
        if value <= self.pivot {
            remap(value, 0.0, self.pivot, 0.0, 0.5)
        } else {
            remap(value, self.pivot, 1.0, 0.5, 1.0)
        }
    }

    fn denormalize(&self, value: f64) -> f64 {
        if value <= 0.5 {
            remap(value, 0.0, 0.5, 0.0, self.pivot)
        } else {
            remap(value, 0.5, 1.0, self.pivot, 1.0)
        }
    }

    fn range(&self) -> ops::Range<f64> {
        0.0..1.0
    }
}

/// Linear gain mapping, going through an inner decibel mapping.
///
/// Denormalized decibel values at or below `off_threshold` produce a gain of exactly zero, so the bottom of the range
/// is true digital silence instead of a very quiet signal.
#[derive(Debug, Copy, Clone)]
pub struct DecibelOff<M> {
    /// Inner mapping, operating in decibels
    pub inner: M,
    /// Decibel floor, at or below which the gain is zero
    pub off_threshold: f64,
}

impl<M: Mapping> Mapping for DecibelOff<M> {
    fn normalize(&self, value: f64) -> f64 {
        self.inner.normalize(linear_to_db(value))
    }

    fn denormalize(&self, value: f64) -> f64 {
        db_to_linear_off(self.inner.denormalize(value), self.off_threshold)
    }

    fn range(&self) -> ops::Range<f64> {
        let ops::Range { start, end } = self.inner.range();
        db_to_linear_off(start, self.off_threshold)..db_to_linear(end)
    }
}
