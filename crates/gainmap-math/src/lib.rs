//! # `gainmap` Math
//!
//! Numeric helpers shared by the `gainmap` crates: decibel conversions and range (re)mapping.
//!
//! All functions are generic over [`Float`] types which can be built from `f64` literals, so they work with both
//! `f32` and `f64`.

#![warn(missing_docs)]

use az::CastFrom;
use num_traits::Float;
use numeric_literals::replace_float_literals;

pub mod range;

/// Converts a decibel value into a linear gain multiplier, using the amplitude convention (`10^(dB / 20)`).
///
/// # Example
///
/// ```
/// use gainmap_math::db_to_linear;
///
/// assert_eq!(1.0, db_to_linear(0.0_f64));
/// assert!((db_to_linear(-6.0_f64) - 0.501).abs() < 1e-3);
/// ```
#[replace_float_literals(T::cast_from(literal))]
pub fn db_to_linear<T: Float + CastFrom<f64>>(db: T) -> T {
    let base = 10.0;
    base.powf(db / 20.0)
}

/// Converts a linear gain multiplier into decibels (`20 * log10(gain)`).
///
/// A gain of zero returns negative infinity; negative gains return NaN.
#[replace_float_literals(T::cast_from(literal))]
pub fn linear_to_db<T: Float + CastFrom<f64>>(linear: T) -> T {
    20.0 * linear.log10()
}

/// Converts a decibel value into a linear gain multiplier, with a floor: any value at or below `off_threshold`
/// returns exactly zero instead of a very small gain.
///
/// # Arguments
///
/// * `db`: Decibel value to convert
/// * `off_threshold`: Decibel value at or below which the output is silenced
///
/// # Example
///
/// ```
/// use gainmap_math::db_to_linear_off;
///
/// assert_eq!(0.0, db_to_linear_off(-70.0_f64, -66.0));
/// assert_eq!(0.0, db_to_linear_off(-66.0_f64, -66.0));
/// assert!(db_to_linear_off(-65.9_f64, -66.0) > 0.0);
/// ```
pub fn db_to_linear_off<T: Float + CastFrom<f64>>(db: T, off_threshold: T) -> T {
    if db <= off_threshold {
        T::zero()
    } else {
        db_to_linear(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(20.0, 10.0)]
    #[case(-20.0, 0.1)]
    #[case(-40.0, 0.01)]
    fn test_db_to_linear(#[case] db: f64, #[case] expected: f64) {
        approx::assert_relative_eq!(expected, db_to_linear(db), epsilon = 1e-12);
    }

    #[test]
    fn test_linear_to_db_zero_is_neg_infinity() {
        assert_eq!(f64::NEG_INFINITY, linear_to_db(0.0_f64));
    }

    #[test]
    fn test_db_to_linear_off_is_exactly_zero() {
        assert_eq!(0.0, db_to_linear_off(-66.1_f64, -66.0));
        assert_eq!(0.0, db_to_linear_off(f64::NEG_INFINITY, -66.0));
        approx::assert_relative_eq!(1.0, db_to_linear_off(0.0_f64, -66.0));
    }

    #[test]
    fn test_f32_support() {
        approx::assert_relative_eq!(10.0_f32, db_to_linear(20.0_f32), epsilon = 1e-5);
        approx::assert_relative_eq!(20.0_f32, linear_to_db(10.0_f32), epsilon = 1e-5);
    }

    #[cfg(not(miri))]
    proptest! {
        #[test]
        fn test_db_round_trip(db in -120.0..60.0f64) {
            prop_assert!(approx::relative_eq!(db, linear_to_db(db_to_linear(db)), epsilon = 1e-9));
        }
    }
}
