//! Byte-budgeted reader used by the decoder.

use std::io::{self, Read};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Maximum number of bytes a single decode may read from its source.
pub const MAX_READER_SIZE: u64 = 20_000_000;

/// A reader that stops yielding bytes once `remaining` reaches zero.
///
/// Reaching the limit looks like end-of-stream to the parser; callers tell
/// the two apart with [`BoundedReader::is_exhausted`], or through a
/// [`Budget`] handle once the reader itself has been handed off.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use json_guard::BoundedReader;
///
/// let mut reader = BoundedReader::new(&b"hello world"[..], 5);
/// let budget = reader.budget();
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "hello");
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    budget: Budget,
}

/// Shared view of a [`BoundedReader`]'s remaining byte allowance.
#[derive(Debug, Clone)]
pub struct Budget(Arc<AtomicU64>);

impl Budget {
    fn new(limit: u64) -> Self {
        Self(Arc::new(AtomicU64::new(limit)))
    }

    /// Bytes still permitted.
    pub fn remaining(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn consume(&self, n: u64) {
        self.0.fetch_sub(n, Ordering::Relaxed);
    }
}

impl<R: Read> BoundedReader<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            budget: Budget::new(limit),
        }
    }

    /// A handle that keeps tracking the allowance after the reader moves.
    pub fn budget(&self) -> Budget {
        self.budget.clone()
    }

    pub fn remaining(&self) -> u64 {
        self.budget.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.is_exhausted()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.budget.remaining();
        if remaining == 0 {
            return Ok(0);
        }
        let max = buf.len().min(remaining.min(usize::MAX as u64) as usize);
        let n = self.inner.read(&mut buf[..max])?;
        self.budget.consume(n as u64);
        Ok(n)
    }
}
