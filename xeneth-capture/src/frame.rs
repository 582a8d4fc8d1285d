use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_BUFFERS: AtomicUsize = AtomicUsize::new(0);

/// Scratch buffer receiving one native frame.
///
/// The storage is made of 16-bit words, enough of them to hold `size_bytes`
/// bytes. Every buffer alive in the process is counted, see [`FrameBuffer::live_count`].
#[derive(Debug)]
pub struct FrameBuffer {
    data: Vec<u16>,
    size_bytes: usize,
}

impl FrameBuffer {
    pub fn new(size_bytes: usize) -> Self {
        LIVE_BUFFERS.fetch_add(1, Ordering::SeqCst);
        Self {
            data: vec![0; size_bytes.div_ceil(2)],
            size_bytes,
        }
    }

    /// Frame size the buffer was requested for, in bytes
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.data
    }

    pub fn as_mut_ptr(&mut self) -> *mut u16 {
        self.data.as_mut_ptr()
    }

    /// Number of frame buffers currently allocated in this process
    pub fn live_count() -> usize {
        LIVE_BUFFERS.load(Ordering::SeqCst)
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        LIVE_BUFFERS.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_sizes_round_up_to_whole_words() {
        assert_eq!(FrameBuffer::new(0).as_slice().len(), 0);
        assert_eq!(FrameBuffer::new(1).as_slice().len(), 1);
        assert_eq!(FrameBuffer::new(4).as_slice().len(), 2);

        let buffer = FrameBuffer::new(640 * 512 * 2 + 1);
        assert_eq!(buffer.as_slice().len(), 640 * 512 + 1);
        assert_eq!(buffer.size_bytes(), 640 * 512 * 2 + 1);
    }
}
