//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not connected. A road or a track is an open
//!   contour; the [`Line`](crate::Geometry::Line) geometry stores one.
//! * **closed** - the last point is connected back to the first one. A building outline is a closed contour; the
//!   [`Polygon`](crate::Geometry::Polygon) geometry stores one.
//!
//! A closed contour does not need to repeat its first point at the end, the closing segment is produced by
//! [`ClosedContour::iter_segments`]. A repeated first point is kept as is and gives a zero-length closing segment.
//!
//! Contours with fewer than two points have no segments at all, whether they are closed or not.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::segment::Segment;

/// Open sequence of points.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Contour<Point> {
    points: Vec<Point>,
}

impl<Point> Contour<Point> {
    /// Creates a new open contour.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Iterates over sequential pairs of points. The last point is not connected to the first one.
    pub fn iter_segments(&self) -> ContourSegmentIterator<'_, Point> {
        ContourSegmentIterator::new(&self.points, false)
    }
}

impl<Point> Deref for Contour<Point> {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

/// Closed sequence of points: the last point is implicitly connected to the first one.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClosedContour<Point> {
    points: Vec<Point>,
}

impl<Point> ClosedContour<Point> {
    /// Creates a new closed contour.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Iterates over cyclic pairs of points, including the segment from the last point back to the first one.
    pub fn iter_segments(&self) -> ContourSegmentIterator<'_, Point> {
        ContourSegmentIterator::new(&self.points, true)
    }
}

impl<Point> Deref for ClosedContour<Point> {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

/// Iterator of contour segments.
#[derive(Debug, Clone)]
pub struct ContourSegmentIterator<'a, P> {
    points: std::slice::Iter<'a, P>,
    first_point: Option<&'a P>,
    prev_point: Option<&'a P>,
}

impl<'a, P> ContourSegmentIterator<'a, P> {
    pub(crate) fn new(points: &'a [P], is_closed: bool) -> Self {
        let first_point = if is_closed && points.len() >= 2 {
            points.first()
        } else {
            None
        };

        Self {
            points: points.iter(),
            first_point,
            prev_point: None,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(&[], false)
    }
}

impl<'a, P> Iterator for ContourSegmentIterator<'a, P> {
    type Item = Segment<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let next_point = match self.points.next() {
            Some(point) => point,
            None => self.first_point.take()?,
        };

        match self.prev_point.replace(next_point) {
            Some(prev) => Some(Segment(prev, next_point)),
            None => self.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_contour_does_not_wrap() {
        let contour = Contour::new(vec![1, 2, 3]);
        let segments: Vec<_> = contour.iter_segments().collect();
        assert_eq!(segments, vec![Segment(&1, &2), Segment(&2, &3)]);
    }

    #[test]
    fn closed_contour_wraps_to_first_point() {
        let contour = ClosedContour::new(vec![1, 2, 3]);
        let segments: Vec<_> = contour.iter_segments().collect();
        assert_eq!(
            segments,
            vec![Segment(&1, &2), Segment(&2, &3), Segment(&3, &1)]
        );
    }

    #[test]
    fn short_contours_have_no_segments() {
        assert_eq!(Contour::<i32>::new(vec![]).iter_segments().count(), 0);
        assert_eq!(Contour::new(vec![1]).iter_segments().count(), 0);
        assert_eq!(ClosedContour::<i32>::new(vec![]).iter_segments().count(), 0);
        assert_eq!(ClosedContour::new(vec![1]).iter_segments().count(), 0);
    }

    #[test]
    fn two_point_ring_goes_there_and_back() {
        let contour = ClosedContour::new(vec![1, 2]);
        let segments: Vec<_> = contour.iter_segments().collect();
        assert_eq!(segments, vec![Segment(&1, &2), Segment(&2, &1)]);
    }

    #[test]
    fn repeated_first_point_gives_empty_closing_segment() {
        let contour = ClosedContour::new(vec![1, 2, 3, 1]);
        assert_eq!(contour.len(), 4);
        assert_eq!(contour.iter_segments().last(), Some(Segment(&1, &1)));
    }
}
