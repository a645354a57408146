pub mod detector_lease;
pub mod face_detector;
