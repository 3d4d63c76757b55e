//! AtomicFloat

use crate::base::Float;
use std::sync::atomic::{AtomicU64, Ordering};

/// Implement atomic floating point value using `AtomicU64`.
#[derive(Debug)]
pub struct AtomicFloat {
    /// Bit representation of floating point value.
    bits: AtomicU64,
}

impl AtomicFloat {
    /// Create a new `AtomicFloat`.
    ///
    /// * `v` - The value.
    pub fn new(v: Float) -> Self {
        Self {
            bits: AtomicU64::new(v.to_bits()),
        }
    }

    /// Add a floating point value.
    ///
    /// * `v` - The value to add.
    pub fn add(&self, v: Float) {
        let mut old_bits = self.bits.load(Ordering::Relaxed);
        loop {
            let new_bits = (Float::from_bits(old_bits) + v).to_bits();
            match self.bits.compare_exchange_weak(
                old_bits,
                new_bits,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(x) => old_bits = x,
            }
        }
    }

    /// Loads the floating point value.
    ///
    /// * `order` - Memory ordering of this operation
    pub fn load(&self, order: Ordering) -> Float {
        Float::from_bits(self.bits.load(order))
    }

    /// Stores the floating point value.
    ///
    /// * `v`     - The value.
    /// * `order` - Memory ordering of this operation
    pub fn store(&self, v: Float, order: Ordering) {
        self.bits.store(v.to_bits(), order);
    }
}

impl Default for AtomicFloat {
    /// Returns the "default value" for `AtomicFloat`.
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clone for AtomicFloat {
    fn clone(&self) -> Self {
        Self::new(self.load(Ordering::SeqCst))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_adds() {
        let a = AtomicFloat::default();
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        a.add(0.5);
                    }
                });
            }
        });
        assert_eq!(a.load(Ordering::SeqCst), 2000.0);
    }

    #[test]
    fn store_then_load() {
        let a = AtomicFloat::new(1.0);
        a.store(-3.25, Ordering::Relaxed);
        assert_eq!(a.load(Ordering::Relaxed), -3.25);
        assert_eq!(a.clone().load(Ordering::Relaxed), -3.25);
    }
}
