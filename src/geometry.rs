use spacemath::{Bounds3, Point3, Vector3};

use crate::config::SimConfig;

/// Calorimeter volume split into a regular grid of cells.
/// A cell's detector id is its row-major index in the grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellGrid {
    pub bounds: Bounds3,
    pub cells: [usize; 3],
}

impl CellGrid {
    pub fn new(bounds: Bounds3, cells: [usize; 3]) -> Self {
        CellGrid { bounds, cells }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        let [x, y, z] = config.half_extent;
        CellGrid::new(Bounds3::new(Point3::origin(), Vector3::new(x, y, z)), config.cells)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().fold(1usize, |total, count| total.saturating_mul(*count))
    }

    // Cells whose index does not fit in an i32 have no detector id
    pub fn detector_id(&self, pos: Point3) -> Option<i32> {
        self.bounds.cell_index(pos, self.cells).and_then(|index| i32::try_from(index).ok())
    }

    pub fn cell_center(&self, detector_id: i32) -> Option<Point3> {
        if detector_id < 0 {
            return None;
        }
        self.bounds.cell_center(detector_id as usize, self.cells)
    }

    // Depth of the front face particles enter through
    pub fn front_face(&self) -> f64 {
        self.bounds.min.z
    }
}
