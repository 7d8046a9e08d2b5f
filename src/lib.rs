pub mod annotate;
pub mod config;
pub mod detection;
pub mod stream;

// Re-export vision types for convenience
pub use facecue_vision::{
    dominant_emotion, Emotion, Expressions, FaceLandmarks, FaceShape, Point, ShapeMeasurements,
};
