//! Lock-free `f32` cell.
//!
//! A normalized parameter value is written by the UI/host thread and read by the audio thread once per process
//! cycle. [`AtomicF32`] stores the value's bit pattern in an [`AtomicU32`], so both sides can access it without
//! locking.
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Atomic `f32` container backed by an [`AtomicU32`]. This type is `repr(transparent)`, so it has the same layout as a
/// single `u32` (and therefore as a single `f32`).
#[repr(transparent)]
#[derive(Default)]
pub struct AtomicF32(AtomicU32);

impl fmt::Debug for AtomicF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF32").field(&self.load(Ordering::Relaxed)).finish()
    }
}

impl From<f32> for AtomicF32 {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl AtomicF32 {
    /// Create a new [`AtomicF32`] holding `value`.
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Consumes the atomic and returns the contained value.
    pub const fn into_inner(self) -> f32 {
        f32::from_bits(self.0.into_inner())
    }

    /// Loads the current value.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::atomic::Ordering;
    /// use gainmap_utils::AtomicF32;
    ///
    /// let value = AtomicF32::new(0.5);
    /// assert_eq!(0.5, value.load(Ordering::Relaxed));
    /// ```
    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.0.load(order))
    }

    /// Stores a new value.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::atomic::Ordering;
    /// use gainmap_utils::AtomicF32;
    ///
    /// let value = AtomicF32::default();
    /// value.store(0.25, Ordering::Relaxed);
    /// assert_eq!(0.25, value.into_inner());
    /// ```
    pub fn store(&self, value: f32, order: Ordering) {
        self.0.store(value.to_bits(), order);
    }

    /// Stores a new value, returning the previous one.
    pub fn swap(&self, value: f32, order: Ordering) -> f32 {
        f32::from_bits(self.0.swap(value.to_bits(), order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(0.0, AtomicF32::default().into_inner());
    }

    #[test]
    fn test_swap_returns_previous() {
        let value = AtomicF32::new(1.0);
        assert_eq!(1.0, value.swap(0.5, Ordering::Relaxed));
        assert_eq!(0.5, value.load(Ordering::Relaxed));
    }

    #[test]
    fn test_nan_bits_preserved() {
        let value = AtomicF32::new(f32::NAN);
        assert!(value.load(Ordering::Relaxed).is_nan());
    }

    #[test]
    fn test_cross_thread() {
        let value = Arc::new(AtomicF32::new(0.0));
        let writer = {
            let value = value.clone();
            std::thread::spawn(move || value.store(0.75, Ordering::Relaxed))
        };
        writer.join().unwrap();
        assert_eq!(0.75, value.load(Ordering::Relaxed));
    }
}
