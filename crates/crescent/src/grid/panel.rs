use super::geometry::{EllipseRegion, GridCell, GridSpec, available_cells, cell_overlaps_ellipse};
use super::gesture::{SwipeDirection, SwipeTracker};
use super::pager::{PageIndicator, PageState, Pagination};
use crate::catalog::{Catalog, ContentItem};
use crate::geometry::Point;
use crate::menu::OptionId;

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Obstructed,
    Empty,
    Item(ContentItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    /// Every cell of the grid in row-major order.
    pub cells: Vec<(GridCell, CellContent)>,
    pub indicator: PageIndicator,
    pub can_prev: bool,
    pub can_next: bool,
}

impl GridPage {
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.cells.iter().filter_map(|(_, content)| match content {
            CellContent::Item(item) => Some(item),
            _ => None,
        })
    }
}

/// Pages the active category's content into the cells the ellipse leaves free.
#[derive(Debug, Clone)]
pub struct GridPanel {
    grid: GridSpec,
    ellipse: EllipseRegion,
    slots: Vec<GridCell>,
    page: PageState,
    category: Option<OptionId>,
    swipe: SwipeTracker,
}

impl GridPanel {
    pub fn new(grid: GridSpec, ellipse: EllipseRegion) -> Self {
        let slots = available_cells(&grid, &ellipse);
        if slots.is_empty() {
            log::warn!(
                "Ellipse covers the whole {}x{} grid; paging disabled",
                grid.rows,
                grid.cols
            );
        }
        Self {
            grid,
            ellipse,
            slots,
            page: PageState::default(),
            category: None,
            swipe: SwipeTracker::new(),
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn ellipse(&self) -> &EllipseRegion {
        &self.ellipse
    }

    pub fn slots(&self) -> &[GridCell] {
        &self.slots
    }

    pub fn items_per_page(&self) -> usize {
        self.slots.len()
    }

    pub fn current_page(&self) -> usize {
        self.page.current()
    }

    pub fn category(&self) -> Option<&OptionId> {
        self.category.as_ref()
    }

    /// Switches the active category. Any change lands on the first page.
    pub fn set_category(&mut self, category: Option<OptionId>) -> bool {
        if self.category == category {
            return false;
        }
        log::debug!("Grid category -> {:?}", category);
        self.category = category;
        self.page.reset();
        true
    }

    pub fn pagination(&self, catalog: &dyn Catalog) -> Pagination {
        let total = self.category.as_ref().map_or(0, |c| catalog.count(c));
        Pagination::new(self.items_per_page(), total)
    }

    pub fn prev_page(&mut self, catalog: &dyn Catalog) -> bool {
        let pagination = self.pagination(catalog);
        let before = self.page.current();
        self.page.clamp(&pagination);
        self.page.prev() || self.page.current() != before
    }

    pub fn next_page(&mut self, catalog: &dyn Catalog) -> bool {
        let pagination = self.pagination(catalog);
        self.page.clamp(&pagination);
        self.page.next(&pagination)
    }

    pub fn press(&mut self, at: Point) {
        self.swipe.press(at);
    }

    pub fn drag(&mut self, to: Point) {
        self.swipe.drag(to);
    }

    pub fn is_dragging(&self) -> bool {
        self.swipe.is_dragging()
    }

    /// Ends the pointer session and flips a page if it was a swipe.
    pub fn release(&mut self, catalog: &dyn Catalog) -> bool {
        match self.swipe.release() {
            Some(SwipeDirection::Left) => self.next_page(catalog),
            Some(SwipeDirection::Right) => self.prev_page(catalog),
            None => false,
        }
    }

    pub fn cancel_gesture(&mut self) {
        self.swipe.cancel();
    }

    pub fn render(&self, catalog: &dyn Catalog) -> GridPage {
        let items = self
            .category
            .as_ref()
            .map(|c| catalog.items(c))
            .unwrap_or_default();
        let pagination = Pagination::new(self.items_per_page(), items.len());

        // the catalog may have shrunk since the page was chosen
        let mut page = self.page;
        page.clamp(&pagination);

        let mut slot = 0;
        let cells = self
            .grid
            .cells()
            .map(|cell| {
                if cell_overlaps_ellipse(cell, &self.grid, &self.ellipse) {
                    return (cell, CellContent::Obstructed);
                }
                let content = pagination
                    .content_index(page.current(), slot)
                    .and_then(|idx| items.get(idx).cloned())
                    .map_or(CellContent::Empty, CellContent::Item);
                slot += 1;
                (cell, content)
            })
            .collect();

        GridPage {
            cells,
            indicator: page.indicator(&pagination),
            can_prev: page.can_prev(&pagination),
            can_next: page.can_next(&pagination),
        }
    }
}
