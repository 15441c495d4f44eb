pub mod culling;
pub mod hit;

pub use culling::Culling;
pub use hit::HitTest;
