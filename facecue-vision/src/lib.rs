pub mod emotion;
pub mod error;
pub mod landmarks;
pub mod shape;

// Re-export commonly used types
pub use emotion::{dominant_emotion, Emotion, Expressions, FALLBACK_EMOTION};
pub use error::{Error, Result};
pub use landmarks::{classify_landmarks, FaceLandmarks, Point};
pub use shape::{classify, FaceShape, ShapeMeasurements};
