use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    /// 0.0 for still images and image sequences.
    pub fps: f64,
    /// 0 when the container does not report a frame count.
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_independent() {
        let meta = SourceMetadata {
            width: 640,
            height: 480,
            fps: 30.0,
            total_frames: 90,
            source_path: Some(PathBuf::from("/tmp/hand.mp4")),
        };
        let cloned = meta.clone();
        assert_eq!(meta, cloned);
    }
}
