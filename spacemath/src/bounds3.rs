use rand::Rng;

use crate::vec3::*;

#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Bounds3 {
    pub min: Point3,
    pub max: Point3,
}

impl std::fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<from {} to {}>", self.min, self.max)
    }
}

impl Bounds3 {
    pub fn new(center: Point3, half_extent: Vector3) -> Self {
        Bounds3 { min: center - half_extent, max: center + half_extent }
    }

    pub fn new_from_extents(min: Point3, max: Point3) -> Self {
        Bounds3 { min, max }
    }

    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn half_extent(&self) -> Vector3 {
        self.extent() / 2.0
    }

    pub fn center(&self) -> Point3 {
        self.min + self.half_extent()
    }

    pub fn contains(&self, point: Point3) -> bool {
        point.x >= self.min.x
        && point.x <= self.max.x
        && point.y >= self.min.y
        && point.y <= self.max.y
        && point.z >= self.min.z
        && point.z <= self.max.z
    }

    /*
        Splits the bounds into a regular grid of cells and returns the
        row-major (x fastest, then y, then z) index of the cell holding the point.
        Points exactly on the upper faces belong to the last cell on that axis.
    */
    pub fn cell_index(&self, point: Point3, cells: [usize; 3]) -> Option<usize> {
        if !self.contains(point) || cells.iter().any(|count| *count == 0) {
            return None;
        }

        let extent = self.extent();
        let axis_cell = |value: f64, low: f64, size: f64, count: usize| -> usize {
            if size <= 0.0 {
                return 0;
            }
            let cell = (((value - low) / size) * count as f64) as usize;
            cell.min(count - 1)
        };

        let x = axis_cell(point.x, self.min.x, extent.x, cells[0]);
        let y = axis_cell(point.y, self.min.y, extent.y, cells[1]);
        let z = axis_cell(point.z, self.min.z, extent.z, cells[2]);

        Some(x + (y * cells[0]) + (z * cells[0] * cells[1]))
    }

    pub fn cell_center(&self, index: usize, cells: [usize; 3]) -> Option<Point3> {
        let total = cells[0].checked_mul(cells[1])?.checked_mul(cells[2])?;
        if index >= total {
            return None;
        }

        let x = index % cells[0];
        let y = (index / cells[0]) % cells[1];
        let z = index / (cells[0] * cells[1]);

        let extent = self.extent();
        Some(Point3::new(
            self.min.x + extent.x * (x as f64 + 0.5) / cells[0] as f64,
            self.min.y + extent.y * (y as f64 + 0.5) / cells[1] as f64,
            self.min.z + extent.z * (z as f64 + 0.5) / cells[2] as f64,
        ))
    }

    // A flat axis always yields its single coordinate
    pub fn get_random_within<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        let extent = self.extent();
        Point3::new(
            self.min.x + extent.x * rng.gen::<f64>(),
            self.min.y + extent.y * rng.gen::<f64>(),
            self.min.z + extent.z * rng.gen::<f64>(),
        )
    }
}
