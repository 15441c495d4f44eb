pub mod cache;
pub mod loader;
pub mod source;

pub use cache::{IconCache, IconState};
pub use loader::{IconLoader, LoadedIcon};
pub use source::{IconSource, StaticIconSource};

#[cfg(feature = "http")]
pub use source::HttpIconSource;
