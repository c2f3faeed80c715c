//! The byte-buffer assembler (BBA): the per-flow, per-direction staging area that accumulates a
//! partially-arrived record until it is complete.
//!
//! Backed by [`fixed_buffer::FixedBuf`], boxed so the 65 535-byte staging area lives on the heap
//! and is only allocated the first time a direction needs to buffer a partial record — the same
//! lazy allocation the original performs with its `SCMalloc(0xffff)` call on first use.

use fixed_buffer::FixedBuf;

/// Maximum size of a DNS-over-TCP record: the largest value the 16-bit length prefix can encode.
pub const MAX_RECORD_LEN: usize = 65_535;

pub struct BufferAssembler {
    inner: Box<FixedBuf<MAX_RECORD_LEN>>,
}

impl BufferAssembler {
    fn new() -> Self {
        Self {
            inner: Box::new(FixedBuf::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.readable().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.readable().is_empty()
    }

    #[must_use]
    pub fn readable(&self) -> &[u8] {
        self.inner.readable()
    }

    /// Appends `data`. Returns `false` without modifying the buffer if doing so would exceed
    /// [`MAX_RECORD_LEN`] bytes — the caller raises `RecordOverflow` and resets on `false`.
    #[must_use]
    fn append(&mut self, data: &[u8]) -> bool {
        if self.len() + data.len() > MAX_RECORD_LEN {
            return false;
        }
        self.inner
            .write_bytes(data)
            .expect("capacity already checked above");
        true
    }
}

/// Appends `data` to `state`'s staging buffer, allocating it lazily on first use. Returns `false`
/// on overflow, leaving the buffer untouched (the caller is responsible for resetting it).
pub(crate) fn append(
    slot: &mut Option<BufferAssembler>,
    data: &[u8],
) -> bool {
    let assembler = slot.get_or_insert_with(BufferAssembler::new);
    assembler.append(data)
}
