//! Linear mapping between value ranges.
//!
//! These are the building blocks of parameter curves: [`normalize`] brings a value from its natural range down to
//! `0..=1`, [`denormalize`] does the opposite, and [`remap`] goes from any range to any other range.
//!
//! None of these functions clamp; values outside the input range extrapolate linearly.
use num_traits::Float;

/// Maps `value` from `min..=max` to `0..=1`.
///
/// # Example
///
/// ```
/// use gainmap_math::range::normalize;
///
/// assert_eq!(0.5, normalize(5.0, 0.0, 10.0));
/// assert_eq!(1.5, normalize(15.0, 0.0, 10.0));
/// ```
#[inline]
pub fn normalize<T: Float>(value: T, min: T, max: T) -> T {
    (value - min) / (max - min)
}

/// Maps a normalized value from `0..=1` to `min..=max`. Inverse of [`normalize`].
#[inline]
pub fn denormalize<T: Float>(normalized: T, min: T, max: T) -> T {
    min + normalized * (max - min)
}

/// Maps `value` from `in_min..=in_max` to `out_min..=out_max`.
///
/// The input bounds map exactly onto the output bounds, i.e. `remap(in_max, in_min, in_max, out_min, out_max)`
/// returns `out_max` without rounding error whenever `out_min` is zero.
///
/// # Arguments
///
/// * `value`: Value to remap
/// * `in_min`: Start of the input range
/// * `in_max`: End of the input range
/// * `out_min`: Start of the output range
/// * `out_max`: End of the output range
#[inline]
pub fn remap<T: Float>(value: T, in_min: T, in_max: T, out_min: T, out_max: T) -> T {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remap_bounds() {
        assert_eq!(0.0, remap(0.0, 0.0, 0.3, 0.0, 0.5));
        assert_eq!(0.5, remap(0.3, 0.0, 0.3, 0.0, 0.5));
        assert_eq!(1.0, remap(1.0, 0.3, 1.0, 0.5, 1.0));
    }

    #[test]
    fn test_normalize_extrapolates() {
        assert_eq!(-0.5, normalize(-5.0, 0.0, 10.0));
        assert_eq!(15.0, denormalize(1.5, 0.0, 10.0));
    }

    #[cfg(not(miri))]
    proptest! {
        #[test]
        fn test_normalize_inverse(value in -100.0..100.0f64) {
            let n = normalize(value, -66.1, 35.0);
            prop_assert!(approx::relative_eq!(value, denormalize(n, -66.1, 35.0), epsilon = 1e-9));
        }

        #[test]
        fn test_remap_inverse(value in 0.0..=1.0f64, pivot in 0.01..0.99f64) {
            let there = remap(value, 0.0, pivot, 0.0, 0.5);
            let back = remap(there, 0.0, 0.5, 0.0, pivot);
            prop_assert!(approx::relative_eq!(value, back, epsilon = 1e-9));
        }
    }
}
