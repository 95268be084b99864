use nalgebra::{Point2, Scalar};
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. Edges are inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Left edge.
    pub x_min: N,
    /// Top edge (bottom in y-up spaces).
    pub y_min: N,
    /// Right edge.
    pub x_max: N,
    /// Bottom edge (top in y-up spaces).
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd + Scalar> Rect<N> {
    /// Creates a rectangle from its edges.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Smallest rectangle containing both points, regardless of the order they are given in.
    pub fn from_corners(a: Point2<N>, b: Point2<N>) -> Self {
        let (x_min, x_max) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y_min, y_max) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Smallest rectangle containing all the points, or `None` if the iterator is empty.
    pub fn from_points(mut points: impl Iterator<Item = Point2<N>>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(Self::from_corners(first, first), |rect, p| {
            rect.merge(Self::from_corners(p, p))
        }))
    }

    /// Left edge.
    pub fn x_min(&self) -> N {
        self.x_min
    }

    /// Right edge.
    pub fn x_max(&self) -> N {
        self.x_max
    }

    /// Top edge.
    pub fn y_min(&self) -> N {
        self.y_min
    }

    /// Bottom edge.
    pub fn y_max(&self) -> N {
        self.y_max
    }

    /// Horizontal extent.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: if self.x_min < other.x_min {
                self.x_min
            } else {
                other.x_min
            },
            y_min: if self.y_min < other.y_min {
                self.y_min
            } else {
                other.y_min
            },
            x_max: if self.x_max > other.x_max {
                self.x_max
            } else {
                other.x_max
            },
            y_max: if self.y_max > other.y_max {
                self.y_max
            } else {
                other.y_max
            },
        }
    }

    /// Returns true if the point lies inside the rectangle or on its edge.
    pub fn contains(&self, point: &Point2<N>) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Returns true if `other` lies entirely inside `self`. Shared edges count as inside.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    /// Returns true if either rectangle contains the other one.
    ///
    /// Partially overlapping rectangles are **not** mutually contained.
    pub fn mutually_contains(&self, other: &Self) -> bool {
        self.contains_rect(other) || other.contains_rect(self)
    }
}
