/// Wire3D Core Library - Software wireframe rendering
///
/// This library provides the stateless core of the renderer: transform
/// matrices, indexed triangle meshes, pinhole projection and the five-stage
/// pipeline that turns model-space vertices into stroked screen triangles.
/// It draws through the `DrawSurface` trait and performs no I/O itself.

pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use geometry::{Face, Mesh, Model};
pub use pipeline::{Pipeline, RenderError, ScreenTriangle};
pub use projection::Camera;
pub use surface::DrawSurface;
pub use transform::{Axis, Transform};
