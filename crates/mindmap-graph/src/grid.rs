use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Square snapping grid for node placement.
///
/// A size of 0 disables snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    size: u32,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    /// Move each coordinate to the nearest multiple of the grid size.
    ///
    /// Halfway values round away from zero.
    pub fn snap_to_grid(&self, point: Point) -> Point {
        if self.size == 0 {
            return point;
        }
        let size = f64::from(self.size);
        Point::new((point.x / size).round() * size, (point.y / size).round() * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_size_leaves_point_unchanged() {
        let grid = Grid::default();
        assert_eq!(grid.snap_to_grid(Point::new(12.34, -5.6)), Point::new(12.34, -5.6));
    }

    #[test]
    fn test_snaps_to_nearest_line() {
        let grid = Grid::new(20);
        assert_eq!(grid.snap_to_grid(Point::new(29.0, 31.0)), Point::new(20.0, 40.0));
        assert_eq!(grid.snap_to_grid(Point::new(-29.0, -31.0)), Point::new(-20.0, -40.0));
    }

    #[test]
    fn test_halfway_rounds_away_from_zero() {
        let grid = Grid::new(10);
        assert_eq!(grid.snap_to_grid(Point::new(15.0, -15.0)), Point::new(20.0, -20.0));
        assert_eq!(grid.snap_to_grid(Point::new(5.0, -5.0)), Point::new(10.0, -10.0));
    }

    #[test]
    fn test_set_size() {
        let mut grid = Grid::new(10);
        grid.set_size(0);
        assert_eq!(grid.size(), 0);
        assert_eq!(grid.snap_to_grid(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }
}
