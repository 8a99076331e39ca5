/// Per-frame transform, projection, culling and draw orchestration
use nalgebra::Vector4;
use thiserror::Error;

use crate::geometry::{Mesh, Model};
use crate::projection::Camera;
use crate::surface::DrawSurface;
use crate::transform::Axis;

/// Failures detected while rendering one frame.
///
/// An error aborts the remaining stages of the current frame; the next tick
/// re-runs the whole pipeline with fresh state, so there is nothing to retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// A vertex landed on the camera's image plane and cannot be
    /// perspective-divided.
    #[error("degenerate projection: vertex {vertex} has camera-space z = {z}")]
    Projection { vertex: usize, z: f32 },

    /// A face referenced a vertex index outside the mesh.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidFace {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// A screen-space triangle, rebuilt every frame from projected vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    pub points: [[f32; 2]; 3],
}

impl ScreenTriangle {
    pub fn new(v0: [f32; 2], v1: [f32; 2], v2: [f32; 2]) -> Self {
        Self {
            points: [v0, v1, v2],
        }
    }

    /// Arithmetic mean of the three vertices.
    pub fn centroid(&self) -> [f32; 2] {
        let [v0, v1, v2] = self.points;
        [
            (v0[0] + v1[0] + v2[0]) / 3.0,
            (v0[1] + v1[1] + v2[1]) / 3.0,
        ]
    }

    /// Winding-order test via angular progression around the centroid.
    ///
    /// The centroid of a non-degenerate triangle is interior, so the angular
    /// step from v0 to v1 seen from it is monotonic with winding direction:
    /// a step in [0, π) or below −π means counter-clockwise (front-facing).
    /// A zero-area triangle yields a zero step and counts as front-facing;
    /// its stroke collapses to a point, which is harmless.
    pub fn is_back_facing(&self) -> bool {
        let c = self.centroid();
        let [v0, v1, _] = self.points;
        let angle1 = (v0[1] - c[1]).atan2(v0[0] - c[0]);
        let angle2 = (v1[1] - c[1]).atan2(v1[0] - c[0]);
        let delta = angle2 - angle1;
        !((0.0..std::f32::consts::PI).contains(&delta) || delta < -std::f32::consts::PI)
    }

    /// Stroke the triangle's outline as one closed path.
    pub fn draw_wireframe(&self, surface: &mut dyn DrawSurface) {
        let [v0, v1, v2] = self.points;
        surface.begin_path();
        surface.move_to(v0[0], v0[1]);
        surface.line_to(v1[0], v1[1]);
        surface.line_to(v2[0], v2[1]);
        surface.close_path();
        surface.stroke();
    }
}

/// The five-stage software render pipeline.
///
/// Owns the transient per-frame buffers (world-, camera- and screen-space
/// vertices plus the triangle list), sized once from the model so the steady
/// state allocates nothing. Stages always run in the same order: world
/// transform, camera transform, projection, triangulation, cull + draw.
pub struct Pipeline {
    world: Vec<Vector4<f32>>,
    view: Vec<Vector4<f32>>,
    screen: Vec<[f32; 2]>,
    triangles: Vec<ScreenTriangle>,
}

impl Pipeline {
    pub fn for_model(model: &Model) -> Self {
        let vertex_count = model.mesh.vertices.len();
        Self {
            world: Vec::with_capacity(vertex_count),
            view: Vec::with_capacity(vertex_count),
            screen: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(model.mesh.faces.len()),
        }
    }

    /// Render one frame of `model` seen through `camera` onto `surface`.
    ///
    /// Clears the surface, then runs all five stages. On error the frame's
    /// remaining stages are skipped and the surface is left cleared (or
    /// partially drawn); the caller decides whether to present it.
    pub fn render(
        &mut self,
        model: &Model,
        camera: &Camera,
        width: u32,
        height: u32,
        surface: &mut dyn DrawSurface,
    ) -> Result<(), RenderError> {
        surface.clear();
        self.to_world_space(model);
        self.to_camera_space(camera);
        self.project(camera, width, height)?;
        self.triangulate(&model.mesh)?;
        self.cull_and_draw(surface);
        Ok(())
    }

    /// Stage 1: model space → world space.
    ///
    /// Matrices apply sequentially per vertex in the fixed order scale,
    /// rotate-X, rotate-Y, rotate-Z, translate.
    fn to_world_space(&mut self, model: &Model) {
        let t = &model.transform;
        let scale = t.scale_matrix();
        let rot_x = t.rotation_matrix(Axis::X, false);
        let rot_y = t.rotation_matrix(Axis::Y, false);
        let rot_z = t.rotation_matrix(Axis::Z, false);
        let translate = t.translation_matrix(false);

        self.world.clear();
        for v in &model.mesh.vertices {
            let mut p = Vector4::new(v.x, v.y, v.z, 1.0);
            p = scale * p;
            p = rot_x * p;
            p = rot_y * p;
            p = rot_z * p;
            p = translate * p;
            self.world.push(p);
        }
    }

    /// Stage 2: world space → camera space.
    ///
    /// The camera's transform is applied inverted and in the reverse order
    /// of the world stage: translate, then rotate-Z, rotate-Y, rotate-X.
    fn to_camera_space(&mut self, camera: &Camera) {
        let t = &camera.transform;
        let translate = t.translation_matrix(true);
        let rot_z = t.rotation_matrix(Axis::Z, true);
        let rot_y = t.rotation_matrix(Axis::Y, true);
        let rot_x = t.rotation_matrix(Axis::X, true);

        self.view.clear();
        for &v in &self.world {
            let mut p = translate * v;
            p = rot_z * p;
            p = rot_y * p;
            p = rot_x * p;
            self.view.push(p);
        }
    }

    /// Stage 3: camera space → screen space.
    fn project(&mut self, camera: &Camera, width: u32, height: u32) -> Result<(), RenderError> {
        self.screen.clear();
        for (i, v) in self.view.iter().enumerate() {
            match camera.project_vertex(v, width, height) {
                Some(point) => self.screen.push(point),
                None => {
                    return Err(RenderError::Projection {
                        vertex: i,
                        z: v.z,
                    })
                }
            }
        }
        Ok(())
    }

    /// Stage 4: gather each face's projected vertices into a triangle.
    fn triangulate(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        self.triangles.clear();
        for (f, face) in mesh.faces.iter().enumerate() {
            for &index in &face.indices {
                if index >= self.screen.len() {
                    return Err(RenderError::InvalidFace {
                        face: f,
                        index,
                        vertex_count: self.screen.len(),
                    });
                }
            }
            let [i0, i1, i2] = face.indices;
            self.triangles.push(ScreenTriangle::new(
                self.screen[i0],
                self.screen[i1],
                self.screen[i2],
            ));
        }
        Ok(())
    }

    /// Stage 5: drop back-facing triangles and stroke the rest.
    fn cull_and_draw(&self, surface: &mut dyn DrawSurface) {
        for triangle in &self.triangles {
            if !triangle.is_back_facing() {
                triangle.draw_wireframe(surface);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every surface call with its arguments, for exact comparisons.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct RecordingSurface {
        calls: Vec<String>,
        strokes: usize,
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }
        fn begin_path(&mut self) {
            self.calls.push("begin".into());
        }
        fn move_to(&mut self, x: f32, y: f32) {
            self.calls.push(format!("move {} {}", x.to_bits(), y.to_bits()));
        }
        fn line_to(&mut self, x: f32, y: f32) {
            self.calls.push(format!("line {} {}", x.to_bits(), y.to_bits()));
        }
        fn close_path(&mut self) {
            self.calls.push("close".into());
        }
        fn stroke(&mut self) {
            self.calls.push("stroke".into());
            self.strokes += 1;
        }
    }

    fn scene() -> (Model, Camera) {
        let mut model = Model::new(Mesh::cube(1.0));
        model.transform.resize(1.0, 2.0, 1.0);
        let mut camera = Camera::new(1.0);
        camera.transform.translate(0.0, 0.0, -5.0);
        (model, camera)
    }

    #[test]
    fn test_scenario_world_camera_screen_positions() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.5, 1.0, 0.5);
        let mut model = Model::new(mesh);
        model.transform.resize(1.0, 2.0, 1.0);
        let mut camera = Camera::new(1.0);
        camera.transform.translate(0.0, 0.0, -5.0);

        let mut pipeline = Pipeline::for_model(&model);
        pipeline.to_world_space(&model);
        assert!((pipeline.world[0] - Vector4::new(0.5, 2.0, 0.5, 1.0)).norm() < 1e-5);

        pipeline.to_camera_space(&camera);
        assert!((pipeline.view[0] - Vector4::new(0.5, 2.0, 5.5, 1.0)).norm() < 1e-5);

        pipeline.project(&camera, 800, 600).unwrap();
        let [sx, sy] = pipeline.screen[0];
        assert!((sx - 472.727).abs() < 1e-2);
        assert!((sy - 590.909).abs() < 1e-2);
    }

    #[test]
    fn test_front_facing_triangle_is_drawn_back_facing_is_not() {
        // Two faces over the same three vertices with opposite windings.
        let mut mesh = Mesh::new();
        mesh.add_vertex(-1.0, -1.0, 0.0);
        mesh.add_vertex(1.0, -1.0, 0.0);
        mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_face(0, 1, 2);
        mesh.add_face(0, 2, 1);
        let model = Model::new(mesh);
        let mut camera = Camera::new(1.0);
        camera.transform.translate(0.0, 0.0, -5.0);

        let mut pipeline = Pipeline::for_model(&model);
        let mut surface = RecordingSurface::default();
        pipeline
            .render(&model, &camera, 800, 600, &mut surface)
            .unwrap();
        assert_eq!(surface.strokes, 1);
    }

    #[test]
    fn test_straight_on_cube_draws_only_the_near_face() {
        // Seen dead-on, the side faces of a convex cube wind clockwise
        // after projection; only the two near-face triangles survive.
        let (model, camera) = scene();
        let mut pipeline = Pipeline::for_model(&model);
        let mut surface = RecordingSurface::default();
        pipeline
            .render(&model, &camera, 800, 600, &mut surface)
            .unwrap();
        assert_eq!(surface.strokes, 2);
    }

    #[test]
    fn test_draw_is_idempotent_without_update() {
        let (model, camera) = scene();
        let mut pipeline = Pipeline::for_model(&model);

        let mut first = RecordingSurface::default();
        pipeline
            .render(&model, &camera, 800, 600, &mut first)
            .unwrap();
        let mut second = RecordingSurface::default();
        pipeline
            .render(&model, &camera, 800, 600, &mut second)
            .unwrap();
        assert_eq!(first, second);
        assert!(first.strokes > 0);
    }

    #[test]
    fn test_out_of_range_face_index_fails_fast() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 1.0);
        mesh.add_vertex(1.0, 0.0, 1.0);
        mesh.add_vertex(0.0, 1.0, 1.0);
        mesh.add_face(0, 1, 7);
        let model = Model::new(mesh);
        let camera = Camera::new(1.0);

        let mut pipeline = Pipeline::for_model(&model);
        let mut surface = RecordingSurface::default();
        let err = pipeline
            .render(&model, &camera, 800, 600, &mut surface)
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidFace {
                face: 0,
                index: 7,
                vertex_count: 3
            }
        );
        assert_eq!(surface.strokes, 0);
    }

    #[test]
    fn test_vertex_on_image_plane_aborts_the_frame() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, -5.0); // camera-space z = 0
        mesh.add_vertex(1.0, 0.0, 1.0);
        mesh.add_vertex(0.0, 1.0, 1.0);
        mesh.add_face(0, 1, 2);
        let model = Model::new(mesh);
        let mut camera = Camera::new(1.0);
        camera.transform.translate(0.0, 0.0, -5.0);

        let mut pipeline = Pipeline::for_model(&model);
        let mut surface = RecordingSurface::default();
        let err = pipeline
            .render(&model, &camera, 800, 600, &mut surface)
            .unwrap_err();
        assert!(matches!(err, RenderError::Projection { vertex: 0, .. }));
        assert_eq!(surface.strokes, 0);
    }

    #[test]
    fn test_winding_invariant_under_cyclic_relabeling() {
        let v0 = [10.0, 10.0];
        let v1 = [50.0, 12.0];
        let v2 = [30.0, 40.0];
        let original = ScreenTriangle::new(v0, v1, v2).is_back_facing();
        let cycled = ScreenTriangle::new(v1, v2, v0).is_back_facing();
        let cycled_twice = ScreenTriangle::new(v2, v0, v1).is_back_facing();
        assert_eq!(original, cycled);
        assert_eq!(original, cycled_twice);
    }

    #[test]
    fn test_winding_flips_under_vertex_swap() {
        let v0 = [10.0, 10.0];
        let v1 = [50.0, 12.0];
        let v2 = [30.0, 40.0];
        let original = ScreenTriangle::new(v0, v1, v2).is_back_facing();
        let swapped = ScreenTriangle::new(v0, v2, v1).is_back_facing();
        assert_ne!(original, swapped);
    }

    #[test]
    fn test_degenerate_triangle_counts_as_front_facing() {
        let point = ScreenTriangle::new([5.0, 5.0], [5.0, 5.0], [5.0, 5.0]);
        assert!(!point.is_back_facing());

        let mut surface = RecordingSurface::default();
        point.draw_wireframe(&mut surface);
        assert_eq!(surface.strokes, 1);
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let t = ScreenTriangle::new([0.0, 0.0], [3.0, 0.0], [0.0, 3.0]);
        let c = t.centroid();
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_call_sequence_per_triangle() {
        let t = ScreenTriangle::new([0.0, 0.0], [10.0, 0.0], [0.0, 10.0]);
        let mut surface = RecordingSurface::default();
        t.draw_wireframe(&mut surface);
        let shape: Vec<&str> = surface
            .calls
            .iter()
            .map(|c| c.split(' ').next().unwrap())
            .collect();
        assert_eq!(shape, ["begin", "move", "line", "line", "close", "stroke"]);
    }
}
