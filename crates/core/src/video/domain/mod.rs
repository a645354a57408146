pub mod image_source;
pub mod image_writer;
