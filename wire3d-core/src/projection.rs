/// Pinhole camera and screen-space projection
use nalgebra::Vector4;

use crate::transform::Transform;

/// Camera-space depths closer to the image plane than this cannot be
/// perspective-divided meaningfully.
pub const MIN_DEPTH: f32 = 1e-6;

/// Viewing frame plus projection strength.
///
/// The focal length is the distance from eye to image plane in normalized
/// units; larger values narrow the field of view. The camera's transform
/// places it in the world — the pipeline applies the transform inverted to
/// bring world-space points into the camera's frame.
#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: Transform,
    pub focal_length: f32,
}

impl Camera {
    pub fn new(focal_length: f32) -> Self {
        Self {
            transform: Transform::new(),
            focal_length,
        }
    }

    /// Project a camera-space vertex onto the viewport.
    ///
    /// Perspective divide by z, then scale by focal length times viewport
    /// width and offset to the viewport center. Width scales both axes: the
    /// original canvas renderer never corrected for aspect ratio, and that
    /// behavior is kept as-is. Returns `None` when the depth is too close
    /// to zero for the divide to produce a usable coordinate.
    pub fn project_vertex(&self, v: &Vector4<f32>, width: u32, height: u32) -> Option<[f32; 2]> {
        if v.z.abs() < MIN_DEPTH {
            return None;
        }
        let w = width as f32;
        let sx = v.x / v.z * self.focal_length * w + w / 2.0;
        let sy = v.y / v.z * self.focal_length * w + height as f32 / 2.0;
        if !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        Some([sx, sy])
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
