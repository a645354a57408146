pub mod detection_log;
pub mod replay_face_detector;
