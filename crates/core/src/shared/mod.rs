pub mod constants;
pub mod frame_error;
pub mod pixel_buffer;
pub mod source_metadata;
