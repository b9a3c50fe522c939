use std::path::Path;

use crate::shared::pixel_buffer::PixelBuffer;
use crate::shared::source_metadata::SourceMetadata;

pub type FrameResult = Result<PixelBuffer, Box<dyn std::error::Error + Send + Sync>>;

/// Produces RGBA frames for the capture loop.
///
/// Implementations own the device or file and handle decoding; the loop
/// only sees [`PixelBuffer`]s.
pub trait FrameSource: Send {
    /// Opens the source and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_>;

    /// Releases any resources held by the source. Must be idempotent.
    fn close(&mut self);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    pub(crate) struct StubSource {
        pub(crate) frames: Vec<PixelBuffer>,
        pub(crate) fail_at: Option<usize>,
        pub(crate) closed: Arc<Mutex<bool>>,
    }

    impl StubSource {
        pub(crate) fn new(frames: Vec<PixelBuffer>) -> Self {
            Self {
                frames,
                fail_at: None,
                closed: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl FrameSource for StubSource {
        fn open(&mut self, _path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
            unreachable!("executors receive opened sources")
        }

        fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_> {
            let fail_at = self.fail_at;
            Box::new(self.frames.drain(..).enumerate().map(move |(i, f)| -> FrameResult {
                if Some(i) == fail_at {
                    Err("decode failed".into())
                } else {
                    Ok(f)
                }
            }))
        }

        fn close(&mut self) {
            *self.closed.lock().unwrap() = true;
        }
    }
}
