//! Accounted, pooled digit buffers.
//!
//! Every magnitude in this crate lives in a [`DigitBuf`]. Buffers are
//! acquired through a single process-wide pool which
//!
//! - recycles released buffers of at most [`MAX_CACHE_LIMBS`] limbs, keeping
//!   at most [`CACHE_SIZE`] of them;
//! - tracks the number of bytes held by live buffers;
//! - refuses any acquisition that would push the live total above the
//!   optional ceiling installed with [`set_memory_limit`].
//!
//! Acquisition never aborts the process: a failing allocation is reported as
//! an out-of-memory [`Error`], and the buffers allocated by the operation so
//! far are handed back by `Drop` while the error propagates.

use super::Limb;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::fmt::{self, Debug};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Maximum number of released buffers kept for reuse.
pub const CACHE_SIZE: usize = 99;

/// Largest buffer, in limbs, that is kept for reuse.
pub const MAX_CACHE_LIMBS: usize = 64;

/// Largest magnitude, in limbs, a single buffer may hold.
pub(crate) const MAX_LIMBS: usize = i32::MAX as usize;

const LIMB_BYTES: usize = mem::size_of::<Limb>();

static POOL: Mutex<Vec<Vec<Limb>>> = parking_lot::const_mutex(Vec::new());

static LIVE: AtomicUsize = AtomicUsize::new(0);

static LIMIT: AtomicUsize = AtomicUsize::new(usize::MAX);

/// Remove all released buffers from the reuse pool.
///
/// Returns the number of buffers that were handed back to the allocator.
pub fn free_cache() -> usize {
    let drained = mem::take(&mut *POOL.lock());
    let count = drained.len();
    drop(drained);
    log::debug!("digit pool drained, {} buffers released", count);
    count
}

/// Install (or with `None`, remove) a ceiling on the bytes held by live digit
/// buffers.
///
/// Returns the previous ceiling. Operations that would need more memory than
/// the ceiling allows fail with an out-of-memory error. Lowering the ceiling
/// below [`memory_in_use`] does not affect existing values.
pub fn set_memory_limit(limit: Option<usize>) -> Option<usize> {
    let previous = LIMIT.swap(limit.unwrap_or(usize::MAX), Ordering::AcqRel);
    match limit {
        Some(bytes) => log::debug!("digit memory ceiling set to {} bytes", bytes),
        None => log::debug!("digit memory ceiling removed"),
    }
    if previous == usize::MAX {
        None
    } else {
        Some(previous)
    }
}

/// Bytes currently held by live digit buffers.
///
/// Buffers resting in the reuse pool are not counted.
pub fn memory_in_use() -> usize {
    LIVE.load(Ordering::Acquire)
}

fn charge(bytes: usize) -> Result<()> {
    let limit = LIMIT.load(Ordering::Acquire);
    match LIVE.fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
        live.checked_add(bytes).filter(|&total| total <= limit)
    }) {
        Ok(_) => Ok(()),
        Err(live) => {
            log::trace!(
                "digit buffer of {} bytes rejected, {} of {} bytes in use",
                bytes,
                live,
                limit
            );
            Err(Error::out_of_memory())
        }
    }
}

fn uncharge(bytes: usize) {
    LIVE.fetch_sub(bytes, Ordering::AcqRel);
}

fn reuse(capacity: usize) -> Option<Vec<Limb>> {
    let mut pool = POOL.lock();
    let index = pool.iter().rposition(|limbs| limbs.capacity() >= capacity)?;
    Some(pool.swap_remove(index))
}

/// A little-endian limb buffer acquired from the digit pool.
///
/// The buffer never grows past the capacity it was acquired with; callers
/// size it for the largest intermediate result up front.
pub struct DigitBuf {
    limbs: Vec<Limb>,
    accounted: usize,
}

impl DigitBuf {
    /// An empty buffer holding no allocation.
    #[inline]
    pub(crate) const fn new() -> Self {
        DigitBuf {
            limbs: Vec::new(),
            accounted: 0,
        }
    }

    /// Acquire an empty buffer able to hold `capacity` limbs.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Ok(DigitBuf::new());
        }
        if capacity > MAX_LIMBS {
            return Err(Error::too_many_bits());
        }
        if capacity <= MAX_CACHE_LIMBS {
            if let Some(limbs) = reuse(capacity) {
                let accounted = limbs.capacity() * LIMB_BYTES;
                charge(accounted)?;
                return Ok(DigitBuf { limbs, accounted });
            }
        }

        let accounted = capacity * LIMB_BYTES;
        charge(accounted)?;
        let mut limbs = Vec::new();
        if limbs.try_reserve_exact(capacity).is_err() {
            uncharge(accounted);
            log::trace!("allocator refused a digit buffer of {} bytes", accounted);
            return Err(Error::out_of_memory());
        }
        Ok(DigitBuf { limbs, accounted })
    }

    /// Acquire a buffer of `len` zero limbs.
    pub(crate) fn zeroed(len: usize) -> Result<Self> {
        let mut buf = DigitBuf::with_capacity(len)?;
        buf.resize(len, 0);
        Ok(buf)
    }

    /// Acquire a buffer holding a copy of `x`, with room for `extra` more limbs.
    pub(crate) fn from_slice(x: &[Limb], extra: usize) -> Result<Self> {
        let capacity = x.len().checked_add(extra).ok_or_else(Error::too_many_bits)?;
        let mut buf = DigitBuf::with_capacity(capacity)?;
        buf.extend_from_slice(x);
        Ok(buf)
    }

    /// Copy the buffer into a fresh acquisition of the same length.
    pub fn try_clone(&self) -> Result<Self> {
        DigitBuf::from_slice(&self.limbs, 0)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.limbs.capacity()
    }

    #[inline]
    pub(crate) fn push(&mut self, limb: Limb) {
        debug_assert!(self.limbs.len() < self.limbs.capacity());
        self.limbs.push(limb);
    }

    #[inline]
    pub(crate) fn resize(&mut self, len: usize, value: Limb) {
        debug_assert!(len <= self.limbs.capacity());
        self.limbs.resize(len, value);
    }

    #[inline]
    pub(crate) fn extend_from_slice(&mut self, x: &[Limb]) {
        debug_assert!(self.limbs.len() + x.len() <= self.limbs.capacity());
        self.limbs.extend_from_slice(x);
    }

    /// Pop most-significant zero limbs.
    #[inline]
    pub(crate) fn normalize(&mut self) {
        while let Some(&0) = self.limbs.last() {
            self.limbs.pop();
        }
    }
}

impl Drop for DigitBuf {
    fn drop(&mut self) {
        uncharge(self.accounted);
        let mut limbs = mem::take(&mut self.limbs);
        if limbs.capacity() == 0 || limbs.capacity() > MAX_CACHE_LIMBS {
            return;
        }
        let mut pool = POOL.lock();
        let room = CACHE_SIZE.saturating_sub(pool.len());
        if room > 0 && pool.try_reserve_exact(room).is_ok() {
            limbs.clear();
            pool.push(limbs);
        }
    }
}

impl Deref for DigitBuf {
    type Target = [Limb];

    #[inline]
    fn deref(&self) -> &[Limb] {
        &self.limbs
    }
}

impl DerefMut for DigitBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Limb] {
        &mut self.limbs
    }
}

impl Default for DigitBuf {
    fn default() -> Self {
        DigitBuf::new()
    }
}

impl PartialEq for DigitBuf {
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs
    }
}

impl Eq for DigitBuf {}

impl Debug for DigitBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.limbs.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_does_not_allocate() {
        let buf = DigitBuf::with_capacity(0).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn capacity_is_honored() {
        for capacity in [1, 7, MAX_CACHE_LIMBS, MAX_CACHE_LIMBS + 1, 1000] {
            let buf = DigitBuf::with_capacity(capacity).unwrap();
            assert!(buf.capacity() >= capacity);
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn too_many_limbs() {
        let err = DigitBuf::with_capacity(MAX_LIMBS + 1).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn from_slice_copies() {
        let buf = DigitBuf::from_slice(&[1, 2, 3], 2).unwrap();
        assert_eq!(&*buf, &[1, 2, 3]);
        assert!(buf.capacity() >= 5);
        let copy = buf.try_clone().unwrap();
        assert_eq!(copy, buf);
    }

    #[test]
    fn normalize_pops_high_zeros() {
        let mut buf = DigitBuf::from_slice(&[1, 0, 2, 0, 0], 0).unwrap();
        buf.normalize();
        assert_eq!(&*buf, &[1, 0, 2]);

        let mut buf = DigitBuf::zeroed(4).unwrap();
        buf.normalize();
        assert!(buf.is_empty());
    }
}
