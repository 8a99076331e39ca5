/// Drawing surface abstraction consumed by the render pipeline
///
/// Mirrors the path-based API of a 2D canvas: the pipeline clears the
/// surface once per frame, then issues a begin → move → line → line →
/// close → stroke sequence for each visible triangle. Coordinates are
/// screen-space pixels with y growing downward.
pub trait DrawSurface {
    /// Fill the whole surface with its background color.
    fn clear(&mut self);

    /// Start a fresh path, discarding any unstroked segments.
    fn begin_path(&mut self);

    /// Move the pen without drawing.
    fn move_to(&mut self, x: f32, y: f32);

    /// Extend the current path with a straight segment.
    fn line_to(&mut self, x: f32, y: f32);

    /// Connect the path back to its starting point.
    fn close_path(&mut self);

    /// Render the accumulated path.
    fn stroke(&mut self);
}
