//! Ellipse-aware grid pagination.
//!
//! A fixed `rows x cols` grid sits behind an elliptical cutout anchored to its
//! left edge. Cells whose bounds touch the cutout stay empty; the rest take
//! the active category's content in row-major order, one page at a time.

pub mod geometry;
pub mod gesture;
pub mod pager;
pub mod panel;

pub use geometry::{EllipseRegion, GridCell, GridSpec, available_cells, cell_overlaps_ellipse};
pub use gesture::{SwipeDirection, SwipeTracker};
pub use pager::{PageIndicator, PageState, Pagination};
pub use panel::{CellContent, GridPage, GridPanel};

/// Width, in pixels, the cutout's horizontal radius is expressed against.
pub const REFERENCE_WIDTH: f64 = 600.0;
pub const REFERENCE_GRID: GridSpec = GridSpec::new(6, 4);
pub const REFERENCE_ELLIPSE: EllipseRegion = EllipseRegion {
    center_x_ratio: 0.0,
    center_y_ratio: 0.5,
    radius_x_px: 300.0,
    radius_y_ratio: 0.4,
};

pub const SWIPE_MIN_DISTANCE: f64 = 50.0;
pub const SWIPE_MAX_VERTICAL: f64 = 100.0;
