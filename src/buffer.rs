//! Caller-owned byte buffers and the transfer (detach) protocol.
//!
//! A [`ByteBuffer`] is a shared handle to a resizable block of bytes, standing in
//! for a host `ArrayBuffer`: cloning the handle shares the storage, and
//! [`ByteBuffer::detach`] moves the bytes out, leaving every handle looking at an
//! empty buffer. A [`BufferView`] is a window onto a buffer, standing in for a
//! typed array or `DataView`.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::{AudioFrameError, AudioFrameResult, AudioSample};

/// Shared, detachable byte storage.
#[derive(Clone, Default)]
pub struct ByteBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl ByteBuffer {
    /// Wrap `bytes` in a new buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bytes)),
        }
    }

    /// Create a zero-filled buffer of `byte_length` bytes.
    pub fn zeroed(byte_length: usize) -> Self {
        Self::new(vec![0; byte_length])
    }

    /// Create a buffer holding the native-endian bytes of `samples`.
    pub fn from_samples<T: AudioSample>(samples: &[T]) -> Self {
        Self::new(T::slice_to_bytes(samples))
    }

    /// Current length in bytes; zero once detached.
    pub fn byte_length(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &ByteBuffer) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy of the current contents.
    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.lock().clone()
    }

    /// Run `f` over the current contents.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run `f` over the current contents, mutably.
    pub fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Move the contents out, leaving this buffer (and every clone of the
    /// handle) zero-length.
    pub fn detach(&self) -> Vec<u8> {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("byte_length", &self.byte_length())
            .finish()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

/// A byte window onto a [`ByteBuffer`].
#[derive(Debug, Clone)]
pub struct BufferView {
    buffer: ByteBuffer,
    byte_offset: usize,
    byte_length: usize,
}

impl BufferView {
    /// View `byte_length` bytes of `buffer` starting at `byte_offset`.
    ///
    /// # Errors
    /// Returns [`AudioFrameError::OutOfBounds`] if the window does not fit in the buffer.
    pub fn new(buffer: ByteBuffer, byte_offset: usize, byte_length: usize) -> AudioFrameResult<Self> {
        let available = buffer.byte_length();
        if byte_offset > available {
            return Err(AudioFrameError::out_of_bounds(
                "byteOffset",
                byte_offset,
                available,
            ));
        }
        if byte_length > available - byte_offset {
            return Err(AudioFrameError::out_of_bounds(
                "byteLength",
                byte_length,
                available - byte_offset,
            ));
        }
        Ok(Self {
            buffer,
            byte_offset,
            byte_length,
        })
    }

    /// The buffer this view looks into.
    pub const fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Offset of the window into the buffer.
    pub const fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Readable length of the window; zero if the buffer has since been
    /// detached or shrunk below the window.
    pub fn byte_length(&self) -> usize {
        let available = self.buffer.byte_length();
        if self.byte_offset + self.byte_length > available {
            0
        } else {
            self.byte_length
        }
    }

    /// Capture at least `required` bytes of the window under a single lock.
    ///
    /// With `take` set and the window spanning the whole buffer, the bytes are
    /// moved out and the buffer is left zero-length; otherwise the window is
    /// copied and the buffer is untouched.
    ///
    /// # Errors
    /// Returns [`AudioFrameError::InsufficientBuffer`] if the window is shorter
    /// than `required` at the moment of capture. Nothing is taken in that case.
    pub fn capture(&self, required: usize, take: bool) -> AudioFrameResult<Vec<u8>> {
        let mut bytes = self.buffer.inner.lock();
        let available = if self.byte_offset + self.byte_length > bytes.len() {
            0
        } else {
            self.byte_length
        };
        if required > available {
            return Err(AudioFrameError::InsufficientBuffer {
                required,
                available,
            });
        }
        if take && self.byte_offset == 0 && self.byte_length == bytes.len() {
            Ok(std::mem::take(&mut *bytes))
        } else {
            Ok(bytes[self.byte_offset..self.byte_offset + self.byte_length].to_vec())
        }
    }

    /// Copy the viewed bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        let length = self.byte_length();
        if length == 0 {
            return Vec::new();
        }
        self.buffer
            .with_bytes(|bytes| bytes[self.byte_offset..self.byte_offset + length].to_vec())
    }
}

impl From<ByteBuffer> for BufferView {
    fn from(buffer: ByteBuffer) -> Self {
        let byte_length = buffer.byte_length();
        Self {
            buffer,
            byte_offset: 0,
            byte_length,
        }
    }
}

/// Check that no buffer appears twice in `transfer`.
///
/// # Errors
/// Returns [`AudioFrameError::DuplicateTransfer`] with the index of the first
/// repeated entry.
pub fn validate_transfer_list(transfer: &[ByteBuffer]) -> AudioFrameResult<()> {
    for (index, buffer) in transfer.iter().enumerate() {
        if transfer[..index].iter().any(|earlier| earlier.ptr_eq(buffer)) {
            return Err(AudioFrameError::DuplicateTransfer { index });
        }
    }
    Ok(())
}

/// Detach every buffer in `transfer`, dropping their contents.
pub fn detach_all(transfer: &[ByteBuffer]) {
    for buffer in transfer {
        let released = buffer.detach();
        trace!(bytes = released.len(), "detached transferred buffer");
    }
}
