pub mod frame_compositor;
pub mod retained_scene;
