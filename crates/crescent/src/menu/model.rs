use super::ITEM_HEIGHT;
use super::option::MenuOption;
use super::selector::{CircularSelector, ScrollCommand, ViewportMetrics};
use super::store::KeyValueStore;
use crate::catalog::Catalog;
use crate::geometry::{Point, Rect};
use crate::grid::{GridPage, GridPanel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collapsed,
    Expanded,
}

/// Side effect of a phase transition. Hosts route scroll and pointer events
/// to the menu only between `Attach` and `Detach`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listeners {
    Attach,
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    Toggle,
    Expand,
    Collapse,
    Scroll(ViewportMetrics),
    PointerLeave,
    ScrollComplete,
    Pick(usize),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PrevPage,
    NextPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MenuResponse {
    pub command: Option<ScrollCommand>,
    pub listeners: Option<Listeners>,
    pub selection_changed: Option<usize>,
    pub should_redraw: bool,
}

/// Hit regions of the expanded widget. A pointer press outside all of them
/// dismisses the menu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuBounds {
    pub trigger: Rect,
    pub list: Rect,
    pub grid: Rect,
}

impl Default for MenuBounds {
    fn default() -> Self {
        Self {
            trigger: Rect::new(0.0, 340.0, 48.0, 80.0),
            list: Rect::new(0.0, 0.0, 300.0, 760.0),
            grid: Rect::new(0.0, 0.0, 600.0, 760.0),
        }
    }
}

impl MenuBounds {
    pub fn contains(&self, p: Point) -> bool {
        [self.trigger, self.list, self.grid]
            .iter()
            .any(|r| r.contains(p))
    }
}

pub type OptionCallback = Box<dyn FnMut(&MenuOption)>;

pub struct Menu<S> {
    selector: CircularSelector<S>,
    grid: GridPanel,
    catalog: Arc<dyn Catalog>,
    bounds: MenuBounds,
    container_height: f64,
    phase: Phase,
    on_option_click: Option<OptionCallback>,
}

impl<S: KeyValueStore> Menu<S> {
    pub fn new(
        selector: CircularSelector<S>,
        grid: GridPanel,
        catalog: Arc<dyn Catalog>,
        bounds: MenuBounds,
        container_height: f64,
    ) -> Self {
        let mut menu = Self {
            selector,
            grid,
            catalog,
            bounds,
            container_height: container_height.max(ITEM_HEIGHT),
            phase: Phase::Collapsed,
            on_option_click: None,
        };
        menu.sync_category();
        menu
    }

    pub fn on_option_click(mut self, callback: impl FnMut(&MenuOption) + 'static) -> Self {
        self.on_option_click = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_expanded(&self) -> bool {
        self.phase == Phase::Expanded
    }

    pub fn selector(&self) -> &CircularSelector<S> {
        &self.selector
    }

    pub fn grid(&self) -> &GridPanel {
        &self.grid
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn render_grid(&self) -> GridPage {
        self.grid.render(self.catalog.as_ref())
    }

    /// Swaps the option list. While expanded the band height changes, so the
    /// viewport is repositioned the same way expansion does.
    pub fn set_options(&mut self, options: Vec<MenuOption>, now: Instant) -> MenuResponse {
        self.selector.set_options(options);
        self.sync_category();
        if !self.is_expanded() {
            return MenuResponse::default();
        }
        MenuResponse {
            command: self.selector.on_expand(self.container_height, now),
            should_redraw: true,
            ..MenuResponse::default()
        }
    }

    pub fn set_catalog(&mut self, catalog: Arc<dyn Catalog>) {
        self.catalog = catalog;
    }

    /// Replaces the grid layout. Paging restarts from the first page.
    pub fn set_grid(&mut self, grid: GridPanel) {
        self.grid = grid;
        self.sync_category();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.is_expanded()
            .then(|| self.selector.next_deadline())
            .flatten()
    }

    pub fn poll(&mut self, now: Instant) -> MenuResponse {
        if !self.is_expanded() {
            return MenuResponse::default();
        }
        MenuResponse {
            command: self.selector.poll(now),
            ..MenuResponse::default()
        }
    }

    pub fn handle(&mut self, event: MenuEvent, now: Instant) -> MenuResponse {
        match (self.phase, event) {
            (Phase::Collapsed, MenuEvent::Toggle | MenuEvent::Expand) => self.expand(now),
            (Phase::Expanded, MenuEvent::Toggle | MenuEvent::Collapse) => self.collapse(),
            (Phase::Collapsed, _) | (Phase::Expanded, MenuEvent::Expand) => {
                MenuResponse::default()
            }
            (Phase::Expanded, event) => self.handle_expanded(event, now),
        }
    }

    fn handle_expanded(&mut self, event: MenuEvent, now: Instant) -> MenuResponse {
        match event {
            MenuEvent::Scroll(metrics) => {
                let action = self.selector.on_scroll(metrics, now);
                if action.selection_changed.is_some() {
                    self.sync_category();
                }
                MenuResponse {
                    command: action.command,
                    selection_changed: action.selection_changed,
                    should_redraw: action.selection_changed.is_some(),
                    ..MenuResponse::default()
                }
            }
            MenuEvent::PointerLeave => {
                self.selector.on_pointer_leave(now);
                MenuResponse::default()
            }
            MenuEvent::ScrollComplete => {
                self.selector.on_scroll_complete();
                MenuResponse::default()
            }
            MenuEvent::Pick(row) => self.pick(row, now),
            MenuEvent::PointerDown(p) => {
                if self.bounds.grid.contains(p) {
                    self.grid.press(p);
                    MenuResponse::default()
                } else if self.bounds.contains(p) {
                    MenuResponse::default()
                } else {
                    log::debug!("Dismissed by press at ({:.0}, {:.0})", p.x, p.y);
                    self.collapse()
                }
            }
            MenuEvent::PointerMove(p) => {
                self.grid.drag(p);
                MenuResponse::default()
            }
            MenuEvent::PointerUp => Self::redraw_if(self.grid.release(self.catalog.as_ref())),
            MenuEvent::PrevPage => Self::redraw_if(self.grid.prev_page(self.catalog.as_ref())),
            MenuEvent::NextPage => Self::redraw_if(self.grid.next_page(self.catalog.as_ref())),
            MenuEvent::Toggle | MenuEvent::Expand | MenuEvent::Collapse => {
                MenuResponse::default()
            }
        }
    }

    fn expand(&mut self, now: Instant) -> MenuResponse {
        self.phase = Phase::Expanded;
        log::debug!("Expanded at index {}", self.selector.selected_index());
        MenuResponse {
            command: self.selector.on_expand(self.container_height, now),
            listeners: Some(Listeners::Attach),
            should_redraw: true,
            ..MenuResponse::default()
        }
    }

    fn collapse(&mut self) -> MenuResponse {
        self.phase = Phase::Collapsed;
        self.selector.cancel_timers();
        self.grid.cancel_gesture();
        log::debug!("Collapsed");
        MenuResponse {
            listeners: Some(Listeners::Detach),
            should_redraw: true,
            ..MenuResponse::default()
        }
    }

    fn pick(&mut self, row: usize, now: Instant) -> MenuResponse {
        let Some(pick) = self.selector.on_pick(row, now) else {
            return MenuResponse::default();
        };
        if pick.changed {
            self.sync_category();
        }
        if let Some(callback) = self.on_option_click.as_mut() {
            callback(&pick.option);
        }
        MenuResponse {
            command: Some(pick.command),
            selection_changed: pick.changed.then(|| self.selector.selected_index()),
            should_redraw: true,
            ..MenuResponse::default()
        }
    }

    fn redraw_if(changed: bool) -> MenuResponse {
        MenuResponse {
            should_redraw: changed,
            ..MenuResponse::default()
        }
    }

    fn sync_category(&mut self) {
        let category = self.selector.selected().map(|o| o.id.clone());
        self.grid.set_category(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlaceholderCatalog;
    use crate::grid::{EllipseRegion, GridSpec};
    use crate::menu::selector::ScrollBehavior;
    use crate::menu::store::MemoryStore;
    use crate::menu::{SELECTION_KEY, SETTLE_DELAY};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn menu_with(store: MemoryStore) -> Menu<MemoryStore> {
        let options = (0..10)
            .map(|i| MenuOption::new(format!("{}", i + 1), format!("Option {}", i + 1)))
            .collect();
        Menu::new(
            CircularSelector::new(options, store),
            GridPanel::new(GridSpec::default(), EllipseRegion::default()),
            Arc::new(PlaceholderCatalog::new(48)),
            MenuBounds::default(),
            350.0,
        )
    }

    fn menu() -> Menu<MemoryStore> {
        menu_with(MemoryStore::new())
    }

    fn scroll(offset: f64) -> MenuEvent {
        MenuEvent::Scroll(ViewportMetrics::new(offset, 350.0, 2100.0))
    }

    #[test]
    fn test_toggle_attaches_and_detaches() {
        let mut menu = menu_with(MemoryStore::with_entry(SELECTION_KEY, "3"));
        let now = Instant::now();

        let resp = menu.handle(MenuEvent::Toggle, now);
        assert_eq!(resp.listeners, Some(Listeners::Attach));
        let cmd = resp.command.unwrap();
        assert_eq!(cmd.behavior, ScrollBehavior::Instant);
        assert_eq!(cmd.target, 770.0);
        assert!(menu.is_expanded());

        menu.handle(scroll(790.0), now + Duration::from_millis(100));
        assert!(menu.next_deadline().is_some());

        let resp = menu.handle(MenuEvent::Toggle, now + Duration::from_millis(120));
        assert_eq!(resp.listeners, Some(Listeners::Detach));
        assert_eq!(menu.phase(), Phase::Collapsed);
        assert_eq!(menu.next_deadline(), None);
        assert_eq!(menu.poll(now + Duration::from_secs(1)), MenuResponse::default());
    }

    #[test]
    fn test_events_after_collapse_are_dropped() {
        let mut menu = menu();
        let now = Instant::now();
        assert_eq!(menu.handle(scroll(790.0), now), MenuResponse::default());
        assert_eq!(menu.handle(MenuEvent::NextPage, now), MenuResponse::default());
        assert_eq!(menu.selector().selected_index(), 0);
        assert_eq!(menu.grid().current_page(), 0);
    }

    #[test]
    fn test_press_outside_dismisses() {
        let mut menu = menu();
        let now = Instant::now();
        menu.handle(MenuEvent::Expand, now);

        let resp = menu.handle(MenuEvent::PointerDown(Point::new(100.0, 100.0)), now);
        assert_eq!(resp.listeners, None);
        assert!(menu.is_expanded());

        let resp = menu.handle(MenuEvent::PointerDown(Point::new(900.0, 100.0)), now);
        assert_eq!(resp.listeners, Some(Listeners::Detach));
        assert!(!menu.is_expanded());
    }

    #[test]
    fn test_pick_calls_back_once_and_stays_open() {
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = picked.clone();
        let mut menu = menu().on_option_click(move |o| sink.borrow_mut().push(o.id.to_string()));
        let now = Instant::now();

        menu.handle(MenuEvent::Expand, now);
        assert!(picked.borrow().is_empty());

        let resp = menu.handle(MenuEvent::Pick(14), now);
        assert_eq!(resp.selection_changed, Some(4));
        assert_eq!(*picked.borrow(), vec!["5".to_string()]);
        assert!(menu.is_expanded());
        assert_eq!(menu.grid().category().map(|c| c.as_str()), Some("5"));
    }

    #[test]
    fn test_scrolled_selection_resets_page() {
        let mut menu = menu();
        let now = Instant::now();
        menu.handle(MenuEvent::Expand, now);
        menu.handle(MenuEvent::NextPage, now);
        menu.handle(MenuEvent::NextPage, now);
        assert_eq!(menu.grid().current_page(), 2);

        let later = now + Duration::from_millis(100);
        let resp = menu.handle(scroll(790.0), later);
        assert_eq!(resp.selection_changed, Some(3));
        assert_eq!(menu.grid().current_page(), 0);

        let resp = menu.poll(later + SETTLE_DELAY);
        assert_eq!(resp.command, Some(ScrollCommand::smooth(770.0)));
    }

    #[test]
    fn test_swipe_inside_grid_turns_page() {
        let mut menu = menu();
        let now = Instant::now();
        menu.handle(MenuEvent::Expand, now);

        menu.handle(MenuEvent::PointerDown(Point::new(500.0, 300.0)), now);
        menu.handle(MenuEvent::PointerMove(Point::new(449.0, 310.0)), now);
        let resp = menu.handle(MenuEvent::PointerUp, now);
        assert!(resp.should_redraw);
        assert_eq!(menu.grid().current_page(), 1);
        assert_eq!(menu.render_grid().indicator.to_string(), "2 / 4");
    }
}
