pub const RGBA_CHANNELS: usize = 4;

/// Half the side of the square sampled around the frame center.
pub const SAMPLE_RADIUS: u32 = 60;

/// Ratios are inclusive upper bounds: a ratio equal to a threshold falls in
/// the lower class.
pub const UNKNOWN_MAX_RATIO: f64 = 0.20;
pub const SCISSORS_MAX_RATIO: f64 = 0.25;
pub const ROCK_MAX_RATIO: f64 = 0.40;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Frames buffered between the capture thread and the classifier.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// Prompt shown before the first round and after a score reset.
pub const IDLE_PROMPT: &str = "Choose your move!";
