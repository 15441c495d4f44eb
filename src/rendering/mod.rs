pub mod canvas;
pub mod scheduler;

// Re-export main types
pub use canvas::{Canvas, DrawCommand};
pub use scheduler::FrameScheduler;
