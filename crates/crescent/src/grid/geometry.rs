use super::{REFERENCE_ELLIPSE, REFERENCE_GRID, REFERENCE_WIDTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    /// Width the ellipse's pixel radius is measured against.
    pub reference_width: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        REFERENCE_GRID
    }
}

impl GridSpec {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            reference_width: REFERENCE_WIDTH,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| GridCell { row, col }))
    }
}

/// Cutout anchored on the grid rectangle. Centre and vertical radius are
/// fractions of the rectangle; the horizontal radius is in pixels of
/// [`GridSpec::reference_width`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseRegion {
    pub center_x_ratio: f64,
    pub center_y_ratio: f64,
    pub radius_x_px: f64,
    pub radius_y_ratio: f64,
}

impl Default for EllipseRegion {
    fn default() -> Self {
        REFERENCE_ELLIPSE
    }
}

impl EllipseRegion {
    pub fn x_band(&self, reference_width: f64) -> (f64, f64) {
        let rx = self.radius_x_px / reference_width;
        (self.center_x_ratio - rx, self.center_x_ratio + rx)
    }

    pub fn y_band(&self) -> (f64, f64) {
        (
            self.center_y_ratio - self.radius_y_ratio,
            self.center_y_ratio + self.radius_y_ratio,
        )
    }

    pub fn mirrored_vertically(&self) -> Self {
        Self {
            center_y_ratio: 1.0 - self.center_y_ratio,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Bounding-box test: the cell is obstructed when its fractional extent
/// overlaps the ellipse's bounding box on both axes. This over-covers the
/// corners of the ellipse, so the cutout is conservative.
pub fn cell_overlaps_ellipse(cell: GridCell, grid: &GridSpec, ellipse: &EllipseRegion) -> bool {
    if grid.rows == 0 || grid.cols == 0 || grid.reference_width <= 0.0 {
        return false;
    }
    let (cols, rows) = (grid.cols as f64, grid.rows as f64);
    let (left, right) = (cell.col as f64 / cols, (cell.col + 1) as f64 / cols);
    let (top, bottom) = (cell.row as f64 / rows, (cell.row + 1) as f64 / rows);

    let (x_min, x_max) = ellipse.x_band(grid.reference_width);
    let (y_min, y_max) = ellipse.y_band();

    let overlap_x = left < x_max && right > x_min;
    let overlap_y = top < y_max && bottom > y_min;
    overlap_x && overlap_y
}

/// Unobstructed cells in row-major order; this is the slot order for paging.
pub fn available_cells(grid: &GridSpec, ellipse: &EllipseRegion) -> Vec<GridCell> {
    if grid.reference_width <= 0.0 {
        return Vec::new();
    }
    grid.cells()
        .filter(|&cell| !cell_overlaps_ellipse(cell, grid, ellipse))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn obstructed(grid: &GridSpec, ellipse: &EllipseRegion) -> BTreeSet<GridCell> {
        grid.cells()
            .filter(|&c| cell_overlaps_ellipse(c, grid, ellipse))
            .collect()
    }

    #[test]
    fn test_reference_layout_leaves_right_half() {
        let grid = GridSpec::default();
        let cells = available_cells(&grid, &EllipseRegion::default());

        let expected: Vec<GridCell> = (0..6)
            .flat_map(|row| [GridCell::new(row, 2), GridCell::new(row, 3)])
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_cell_touching_band_edge_is_free() {
        // col 2 starts exactly at 300/600
        let grid = GridSpec::default();
        let ellipse = EllipseRegion::default();
        assert!(cell_overlaps_ellipse(GridCell::new(0, 1), &grid, &ellipse));
        assert!(!cell_overlaps_ellipse(GridCell::new(0, 2), &grid, &ellipse));
    }

    #[test]
    fn test_small_ellipse_only_blocks_middle_rows() {
        let grid = GridSpec::default();
        let ellipse = EllipseRegion {
            radius_x_px: 100.0,
            radius_y_ratio: 0.1,
            ..EllipseRegion::default()
        };
        let blocked: Vec<GridCell> = obstructed(&grid, &ellipse).into_iter().collect();
        assert_eq!(blocked, vec![GridCell::new(2, 0), GridCell::new(3, 0)]);
    }

    #[test]
    fn test_mirrored_ellipse_mirrors_obstruction() {
        let grid = GridSpec::new(6, 4);
        let ellipse = EllipseRegion {
            center_y_ratio: 0.3,
            radius_y_ratio: 0.25,
            ..EllipseRegion::default()
        };

        let mirrored: BTreeSet<GridCell> = obstructed(&grid, &ellipse.mirrored_vertically())
            .into_iter()
            .map(|c| GridCell::new(grid.rows - 1 - c.row, c.col))
            .collect();
        assert_eq!(obstructed(&grid, &ellipse), mirrored);

        let centred = EllipseRegion::default();
        assert_eq!(
            obstructed(&grid, &centred),
            obstructed(&grid, &centred.mirrored_vertically())
        );
    }

    #[test]
    fn test_degenerate_grids_have_no_cells() {
        let ellipse = EllipseRegion::default();
        assert!(available_cells(&GridSpec::new(0, 4), &ellipse).is_empty());
        let bad_width = GridSpec {
            reference_width: 0.0,
            ..GridSpec::default()
        };
        assert!(available_cells(&bad_width, &ellipse).is_empty());
    }

    #[test]
    fn test_full_cover_leaves_nothing() {
        let grid = GridSpec::new(2, 2);
        let ellipse = EllipseRegion {
            radius_x_px: 1200.0,
            radius_y_ratio: 1.0,
            ..EllipseRegion::default()
        };
        assert!(available_cells(&grid, &ellipse).is_empty());
    }
}
