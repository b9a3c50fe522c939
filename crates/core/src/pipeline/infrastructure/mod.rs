pub mod sequential_capture_executor;
pub mod threaded_capture_executor;
