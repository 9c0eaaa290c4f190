//! Atomic floating-point accumulators.
//!
//! The tree accumulates evaluations into shared `f64`/`f32` cells from
//! many threads. These wrap the value's bit pattern in an integer atomic
//! and provide `fetch_add` through a CAS loop; concurrent adds may land
//! in any order (floating-point addition is not associative) but never
//! tear.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// An `f64` cell with atomic load/store and additive read-modify-write.
#[derive(Debug)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        AtomicF64 {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.bits.load(order))
    }

    #[inline]
    pub fn store(&self, value: f64, order: Ordering) {
        self.bits.store(value.to_bits(), order);
    }

    /// Add `delta` and return the previous value.
    pub fn fetch_add(&self, delta: f64, order: Ordering) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, order, Ordering::Relaxed)
            {
                Ok(_) => return f64::from_bits(current),
                Err(actual) => current = actual,
            }
        }
    }
}

/// An `f32` cell with atomic load/store and additive read-modify-write.
#[derive(Debug)]
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        AtomicF32 {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.bits.load(order))
    }

    #[inline]
    pub fn store(&self, value: f32, order: Ordering) {
        self.bits.store(value.to_bits(), order);
    }

    /// Add `delta` and return the previous value.
    pub fn fetch_add(&self, delta: f32, order: Ordering) -> f32 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f32::from_bits(current) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, order, Ordering::Relaxed)
            {
                Ok(_) => return f32::from_bits(current),
                Err(actual) => current = actual,
            }
        }
    }
}
