use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("buffer of {actual} bytes does not match a {width}x{height} RGBA frame")]
    InvalidDimensions { width: u32, height: u32, actual: usize },
}
