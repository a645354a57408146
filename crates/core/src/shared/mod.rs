pub mod constants;
pub mod detection;
pub mod display_surface;
pub mod frame;
