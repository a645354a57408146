pub mod pipeline_logger;
pub mod visualize_faces_use_case;
