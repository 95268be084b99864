//! See [`Segment`].

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<'a, P> Segment<'a, P> {
    /// Converts both endpoints with the given function. Returns `None` if any of the endpoints cannot be converted.
    pub fn map<Out>(&self, mut f: impl FnMut(&P) -> Option<Out>) -> Option<(Out, Out)> {
        Some((f(self.0)?, f(self.1)?))
    }
}
