use anyhow::Result;
use facecue_vision::{Expressions, Point};
use serde::{Deserialize, Serialize};

use crate::config::DisplaySize;

/// Face box as x, y (top-left), width, height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceBox {
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }
}

/// One face as reported by the external detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    #[serde(rename = "box")]
    pub bbox: FaceBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Validated against the 68-point layout when annotated
    pub landmarks: Vec<Point>,
    #[serde(default)]
    pub expressions: Expressions,
}

/// All detections for a single video frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub faces: Vec<FaceDetection>,
}

impl Frame {
    /// Rescale detections from frame coordinates to the display surface
    pub fn resize(self, display: DisplaySize) -> Result<Frame> {
        if !(self.width > 0.0 && self.height > 0.0) {
            anyhow::bail!("invalid frame size {}x{}", self.width, self.height);
        }
        if !(display.width > 0.0 && display.height > 0.0) {
            anyhow::bail!("invalid display size {}x{}", display.width, display.height);
        }
        let sx = display.width / self.width;
        let sy = display.height / self.height;
        if sx == 1.0 && sy == 1.0 {
            return Ok(self);
        }

        let faces = self
            .faces
            .into_iter()
            .map(|f| FaceDetection {
                bbox: f.bbox.scale(sx, sy),
                landmarks: f.landmarks.iter().map(|p| p.scale(sx, sy)).collect(),
                ..f
            })
            .collect();

        Ok(Frame {
            width: display.width,
            height: display.height,
            faces,
        })
    }
}
