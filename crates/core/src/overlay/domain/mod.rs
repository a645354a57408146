pub mod coordinate_mapper;
pub mod display_engine;
pub mod overlay_renderer;
pub mod overlay_set;
pub mod overlay_style;
