//! Fixed-capacity receive ring buffer.
//!
//! Shared between the UART IRQ handler (producer) and the console reader
//! (consumer). Indices are atomics so the handler may preempt the reader at
//! any byte boundary; no locks, no allocation.
//!
//! One slot is kept empty to tell full from empty, so a buffer of size `N`
//! holds `N - 1` bytes. A byte arriving while the buffer is full is dropped,
//! the classic Arduino `store_char` behaviour.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Default receive buffer size in bytes.
pub const SERIAL_BUFFER_SIZE: usize = 64;

/// Circular byte buffer with head/tail indices.
///
/// # Memory Ordering
///
/// - Producer publishes the head with `Release` after the byte is written
/// - Consumer loads the head with `Acquire` before reading the byte
/// - This ensures the consumer sees the byte before it sees the index move
pub struct RingBuffer<const N: usize = SERIAL_BUFFER_SIZE> {
    buffer: UnsafeCell<[u8; N]>,
    head: AtomicUsize,
    tail: AtomicUsize,
}

// SAFETY: single producer (IRQ handler), single consumer (reader). Each
// index is written by exactly one side; slot access is ordered by the
// Acquire/Release pairs on the indices.
unsafe impl<const N: usize> Sync for RingBuffer<N> {}
unsafe impl<const N: usize> Send for RingBuffer<N> {}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        assert!(N > 1, "ring buffer needs at least one usable slot");
        Self {
            buffer: UnsafeCell::new([0u8; N]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Store one received byte. Dropped silently if the buffer is full.
    #[inline]
    pub fn store_char(&self, byte: u8) {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) % N;

        if next == self.tail.load(Ordering::Acquire) {
            // Full: drop the byte rather than overwrite unread data.
            return;
        }

        // SAFETY: `head` is owned by the producer; the slot is outside the
        // consumer's readable range until the Release store below.
        unsafe {
            (*self.buffer.get())[head] = byte;
        }
        self.head.store(next, Ordering::Release);
    }

    /// Number of buffered bytes.
    #[inline]
    pub fn available(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        (N + head - tail) % N
    }

    /// Next byte without consuming it, `None` when empty.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        if self.head.load(Ordering::Acquire) == tail {
            return None;
        }
        // SAFETY: head != tail, so the slot at `tail` holds published data.
        Some(unsafe { (*self.buffer.get())[tail] })
    }

    /// Next byte, advancing the tail, `None` when empty.
    #[inline]
    pub fn read(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        if self.head.load(Ordering::Acquire) == tail {
            return None;
        }
        // SAFETY: head != tail, so the slot at `tail` holds published data.
        let byte = unsafe { (*self.buffer.get())[tail] };
        self.tail.store((tail + 1) % N, Ordering::Release);
        Some(byte)
    }

    /// Discard all buffered bytes (tail := head).
    #[inline]
    pub fn clear(&self) {
        let head = self.head.load(Ordering::Acquire);
        self.tail.store(head, Ordering::Release);
    }

    /// Usable capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
