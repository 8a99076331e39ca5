/// Position/rotation/scale state and the matrices derived from it
use nalgebra::{Matrix4, Vector3};

/// Axis selector for per-axis rotation matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Placement of a single object: translation, per-axis rotation and scale.
///
/// Rotation is stored in degrees and accumulates without wraparound; the
/// values only ever pass through sin/cos, so unbounded growth is harmless.
/// `resize` replaces the scale outright while `translate`/`rotate` add to
/// the current state.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Move by a delta in world units.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vector3::new(dx, dy, dz);
    }

    /// Rotate by delta amounts (in degrees).
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vector3::new(dx, dy, dz);
    }

    /// Replace the scale factors.
    pub fn resize(&mut self, sx: f32, sy: f32, sz: f32) {
        self.scale = Vector3::new(sx, sy, sz);
    }

    /// Translation matrix for the current position; `inverse` negates it.
    pub fn translation_matrix(&self, inverse: bool) -> Matrix4<f32> {
        let t = if inverse {
            -self.position
        } else {
            self.position
        };
        Matrix4::new_translation(&t)
    }

    /// Rotation matrix about one axis for the current rotation state.
    ///
    /// `inverse` flips the sign of the sine terms, which for an orthonormal
    /// rotation is its exact inverse.
    pub fn rotation_matrix(&self, axis: Axis, inverse: bool) -> Matrix4<f32> {
        let degrees = match axis {
            Axis::X => self.rotation.x,
            Axis::Y => self.rotation.y,
            Axis::Z => self.rotation.z,
        };
        let (s, c) = degrees.to_radians().sin_cos();
        let s = if inverse { -s } else { s };

        match axis {
            Axis::X => Matrix4::new(
                1.0, 0.0, 0.0, 0.0, //
                0.0, c, -s, 0.0, //
                0.0, s, c, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ),
            Axis::Y => Matrix4::new(
                c, 0.0, s, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                -s, 0.0, c, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ),
            Axis::Z => Matrix4::new(
                c, -s, 0.0, 0.0, //
                s, c, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }

    /// Scale matrix for the current scale factors.
    pub fn scale_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
