pub mod gesture_classifier;
pub mod gesture_label;
pub mod sampling_window;
pub mod skin_tone;
