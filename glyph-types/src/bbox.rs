use crate::Point;
use std::ops::{Mul, Sub};

/// Minimum and maximum extents of a rectangular region.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    /// Minimum extent in the x direction-- the left side of a region.
    pub x_min: T,
    /// Minimum extent in the y direction. In a Y-up coordinate system,
    /// which is used by fonts, this represents the bottom of a region.
    pub y_min: T,
    /// Maximum extent in the x direction-- the right side of a region.
    pub x_max: T,
    /// Maximum extend in the y direction. In a Y-up coordinate system,
    /// which is used by fonts, this represents the top of the
    /// region.
    pub y_max: T,
}

impl<T> BoundingBox<T>
where
    T: PartialOrd + Copy,
{
    /// Returns the smallest box containing all of the given points, or
    /// `None` if the iterator is empty.
    pub fn from_points(points: impl IntoIterator<Item = Point<T>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        for point in points {
            bbox.add_point(point);
        }
        Some(bbox)
    }

    /// Extends the box to include the given point.
    pub fn add_point(&mut self, point: Point<T>) {
        if point.x < self.x_min {
            self.x_min = point.x;
        }
        if point.x > self.x_max {
            self.x_max = point.x;
        }
        if point.y < self.y_min {
            self.y_min = point.y;
        }
        if point.y > self.y_max {
            self.y_max = point.y;
        }
    }
}

impl<T> BoundingBox<T>
where
    T: Sub<Output = T> + Copy,
{
    /// Returns the horizontal extent of the box.
    pub fn width(&self) -> T {
        self.x_max - self.x_min
    }

    /// Returns the vertical extent of the box.
    pub fn height(&self) -> T {
        self.y_max - self.y_min
    }
}

impl<T> BoundingBox<T>
where
    T: Mul<Output = T> + Copy,
{
    /// Return a `BoundingBox` scaled by a scale factor of the same type
    /// as the stored bounds.
    pub fn scale(&self, factor: T) -> Self {
        Self {
            x_min: self.x_min * factor,
            y_min: self.y_min * factor,
            x_max: self.x_max * factor,
            y_max: self.y_max * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points() {
        let bbox = BoundingBox::from_points([
            Point::new(10, -4),
            Point::new(-2, 8),
            Point::new(5, 3),
        ])
        .unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x_min: -2,
                y_min: -4,
                x_max: 10,
                y_max: 8
            }
        );
        assert_eq!(bbox.width(), 12);
        assert_eq!(bbox.height(), 12);
        assert_eq!(BoundingBox::<i32>::from_points([]), None);
    }

    #[test]
    fn scale() {
        let bbox = BoundingBox {
            x_min: 1,
            y_min: 2,
            x_max: 3,
            y_max: 4,
        };
        assert_eq!(bbox.scale(2).x_max, 6);
    }
}
