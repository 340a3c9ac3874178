//! Cryptographically secure randomness.
//!
//! Every draw is fallible: if the OS generator cannot be reached the error
//! is surfaced as [`CryptoError::RngUnavailable`]. There is no weaker
//! fallback source.

use crate::error::{CryptoError, Result};
use getrandom::fill;

/// A source of cryptographically secure random bytes.
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Uniform `u32`.
    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Uniform index in `0..bound` without modulo bias.
    ///
    /// Draws falling in the incomplete top bucket of the `u32` range are
    /// rejected and redrawn. `bound` must be non-zero.
    fn index(&mut self, bound: usize) -> Result<usize> {
        debug_assert!(
            bound > 0 && bound <= u32::MAX as usize,
            "index bound out of range"
        );
        let bound = bound as u32;
        let zone = u32::MAX - (u32::MAX - bound + 1) % bound;
        loop {
            let v = self.next_u32()?;
            if v <= zone {
                return Ok((v % bound) as usize);
            }
        }
    }

    /// Fisher–Yates shuffle of `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]) -> Result<()>
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1)?;
            items.swap(i, j);
        }
        Ok(())
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        fill(buf).map_err(|_| CryptoError::RngUnavailable)
    }
}
