use facecue_vision::{classify_landmarks, FaceShape, Point};
use serde::Serialize;

use crate::config::OverlayStyle;
use crate::detection::{FaceBox, FaceDetection, Frame};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    /// Left end of the text baseline
    pub at: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerStyle {
    pub background: String,
    pub text_color: String,
    pub font: String,
}

/// Everything the rendering surface needs to label one face
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceAnnotation {
    #[serde(rename = "box")]
    pub bbox: FaceBox,
    pub shape: FaceShape,
    pub emotion: String,
    pub banner: FaceBox,
    pub lines: [TextLine; 2],
    pub style: BannerStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAnnotations {
    pub frame: u64,
    pub width: f64,
    pub height: f64,
    pub faces: Vec<FaceAnnotation>,
}

/// Shape for one detection; bad landmark sets degrade to Undetermined
pub fn face_shape(face: &FaceDetection) -> FaceShape {
    match classify_landmarks(&face.landmarks) {
        Ok(shape) => shape,
        Err(e) => {
            log::warn!("face at ({:.0}, {:.0}): {}", face.bbox.x, face.bbox.y, e);
            FaceShape::Undetermined
        }
    }
}

pub fn annotate_face(face: &FaceDetection, style: &OverlayStyle) -> FaceAnnotation {
    let shape = face_shape(face);
    let emotion = face.expressions.dominant().to_string();
    let b = face.bbox;
    let text_x = b.x + style.text_padding;

    FaceAnnotation {
        bbox: b,
        banner: FaceBox {
            x: b.x,
            y: b.y - style.label_height,
            width: b.width,
            height: style.label_height,
        },
        lines: [
            TextLine {
                text: format!("Shape: {}", shape),
                at: Point::new(text_x, b.y - style.first_line_offset),
            },
            TextLine {
                text: format!("Emotion: {}", emotion),
                at: Point::new(text_x, b.y - style.second_line_offset),
            },
        ],
        shape,
        emotion,
        style: BannerStyle {
            background: style.background.clone(),
            text_color: style.text_color.clone(),
            font: style.font.clone(),
        },
    }
}

pub fn annotate_frame(index: u64, frame: &Frame, style: &OverlayStyle) -> FrameAnnotations {
    let faces = frame
        .faces
        .iter()
        .map(|face| annotate_face(face, style))
        .collect::<Vec<_>>();
    log::debug!("frame {}: annotated {} face(s)", index, faces.len());

    FrameAnnotations {
        frame: index,
        width: frame.width,
        height: frame.height,
        faces,
    }
}
