pub mod detection;
pub mod diagnostics;
pub mod overlay;
pub mod pipeline;
pub mod shared;
pub mod video;
