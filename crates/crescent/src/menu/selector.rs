//! Circular scroll selection over a tripled option list.
//!
//! The host renders `options` three times back to back, each row
//! [`ITEM_HEIGHT`] tall, and reports scroll offsets here. The selector maps
//! the viewport centre to a logical index modulo `N`, debounces a snap back to
//! the nearest row centre, and keeps the offset inside the middle band by
//! jumping exactly one band height whenever it drifts to either edge.
//!
//! Nothing here owns a timer or a viewport. Deadlines are plain [`Instant`]s
//! the host polls, and viewport mutations come back as [`ScrollCommand`]s.
//! Every self-triggered command acquires a suppression scope first so the
//! scroll events it causes are ignored. The scope carries its own deadline
//! and is dropped either on the completion signal or once [`poll`] sees it
//! expire.
//!
//! [`poll`]: CircularSelector::poll

use super::option::MenuOption;
use super::store::KeyValueStore;
use super::{
    BAND_COPIES, EDGE_MARGIN, EXPAND_SUPPRESS, ITEM_HEIGHT, JUMP_SUPPRESS, LEAVE_SETTLE_DELAY,
    SELECTION_KEY, SETTLE_DELAY, SNAP_EPSILON, SNAP_SUPPRESS,
};
use std::time::{Duration, Instant};

/// Snapshot of the host's scrollable list at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    pub offset: f64,
    pub container_height: f64,
    pub scroll_height: f64,
}

impl ViewportMetrics {
    pub fn new(offset: f64, container_height: f64, scroll_height: f64) -> Self {
        Self {
            offset,
            container_height,
            scroll_height,
        }
    }

    pub fn max_offset(&self) -> f64 {
        (self.scroll_height - self.container_height).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Reposition without animation; used for restore and boundary jumps.
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub target: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollCommand {
    pub fn instant(target: f64) -> Self {
        Self {
            target,
            behavior: ScrollBehavior::Instant,
        }
    }

    pub fn smooth(target: f64) -> Self {
        Self {
            target,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollAction {
    pub selection_changed: Option<usize>,
    pub command: Option<ScrollCommand>,
}

#[derive(Debug, Clone)]
pub struct Pick {
    pub option: MenuOption,
    pub changed: bool,
    pub command: ScrollCommand,
}

#[derive(Debug, Clone, Copy)]
struct Suppression {
    until: Instant,
}

/// Reads the persisted index, falling back to 0 when it is missing, not a
/// base-10 integer, or outside `[0, len)`.
pub fn restore_selection(store: &impl KeyValueStore, len: usize) -> usize {
    store
        .get(SELECTION_KEY)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&idx| idx < len)
        .unwrap_or(0)
}

/// Row of the tripled list whose centre is nearest the viewport centre.
/// Exact half-row ties resolve to the higher row, negative rows included.
pub fn row_at_center(offset: f64, container_height: f64) -> i64 {
    let center = offset + container_height / 2.0;
    ((center - ITEM_HEIGHT / 2.0) / ITEM_HEIGHT + 0.5).floor() as i64
}

/// Scroll offset that puts the centre of `row` at the viewport centre.
pub fn row_offset(row: i64, container_height: f64) -> f64 {
    row as f64 * ITEM_HEIGHT + ITEM_HEIGHT / 2.0 - container_height / 2.0
}

pub fn wrap_index(raw: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    raw.rem_euclid(len as i64) as usize
}

pub struct CircularSelector<S> {
    options: Vec<MenuOption>,
    selected: usize,
    store: S,
    viewport: ViewportMetrics,
    settle_at: Option<Instant>,
    suppression: Option<Suppression>,
}

impl<S: KeyValueStore> CircularSelector<S> {
    pub fn new(options: Vec<MenuOption>, store: S) -> Self {
        let selected = restore_selection(&store, options.len());
        log::debug!("Restored selection {} of {}", selected, options.len());
        Self {
            options,
            selected,
            store,
            viewport: ViewportMetrics::default(),
            settle_at: None,
            suppression: None,
        }
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&MenuOption> {
        self.options.get(self.selected)
    }

    pub fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    pub fn band_height(&self) -> f64 {
        self.len() as f64 * ITEM_HEIGHT
    }

    pub fn content_height(&self) -> f64 {
        self.band_height() * BAND_COPIES as f64
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppression.is_some_and(|s| now < s.until)
    }

    pub fn settle_pending(&self) -> bool {
        self.settle_at.is_some()
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let suppress = self.suppression.map(|s| s.until);
        match (self.settle_at, suppress) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Replaces the option list, keeping the selection when it is still in range.
    /// Returns true when the selected index had to move.
    pub fn set_options(&mut self, options: Vec<MenuOption>) -> bool {
        self.options = options;
        self.cancel_timers();
        if self.selected < self.options.len() || self.selected == 0 {
            return false;
        }
        self.selected = 0;
        self.persist();
        true
    }

    pub fn on_expand(&mut self, container_height: f64, now: Instant) -> Option<ScrollCommand> {
        if self.is_empty() {
            return None;
        }
        let row = (self.len() + self.selected) as i64;
        let target = row_offset(row, container_height);
        self.viewport = ViewportMetrics::new(target, container_height, self.content_height());
        self.settle_at = None;
        self.suppress(now, EXPAND_SUPPRESS);
        Some(ScrollCommand::instant(target))
    }

    pub fn on_scroll(&mut self, metrics: ViewportMetrics, now: Instant) -> ScrollAction {
        self.viewport = metrics;
        if self.is_empty() || self.is_suppressed(now) {
            return ScrollAction::default();
        }

        let mut action = ScrollAction::default();

        let raw = row_at_center(metrics.offset, metrics.container_height);
        let index = wrap_index(raw, self.len());
        if index != self.selected {
            self.selected = index;
            self.persist();
            action.selection_changed = Some(index);
        }

        self.settle_at = Some(now + SETTLE_DELAY);

        if let Some(target) = self.recenter_target(metrics) {
            log::debug!("Recentring {:.1} -> {:.1}", metrics.offset, target);
            self.viewport.offset = target;
            self.suppress(now, JUMP_SUPPRESS);
            action.command = Some(ScrollCommand::instant(target));
        }

        action
    }

    fn recenter_target(&self, metrics: ViewportMetrics) -> Option<f64> {
        let band = self.band_height();
        let bottom_edge = metrics.scroll_height - metrics.container_height - EDGE_MARGIN;
        let target = if metrics.offset <= EDGE_MARGIN {
            metrics.offset + band
        } else if metrics.offset >= bottom_edge {
            metrics.offset - band
        } else {
            return None;
        };
        // a jump that lands on the opposite edge would bounce forever
        (target > EDGE_MARGIN && target < bottom_edge).then_some(target)
    }

    pub fn on_pointer_leave(&mut self, now: Instant) {
        if !self.is_empty() {
            self.settle_at = Some(now + LEAVE_SETTLE_DELAY);
        }
    }

    pub fn on_settle(&mut self, now: Instant) -> Option<ScrollCommand> {
        self.settle_at = None;
        if self.is_empty() || self.is_suppressed(now) {
            return None;
        }
        let ViewportMetrics {
            offset,
            container_height,
            ..
        } = self.viewport;
        let target = row_offset(row_at_center(offset, container_height), container_height);
        if (target - offset).abs() < SNAP_EPSILON {
            return None;
        }
        self.suppress(now, SNAP_SUPPRESS);
        Some(ScrollCommand::smooth(target))
    }

    /// Completion signal for a smooth scroll started by this selector.
    pub fn on_scroll_complete(&mut self) {
        self.suppression = None;
    }

    /// Selects the option shown at `row` of the tripled list and centres that row.
    pub fn on_pick(&mut self, row: usize, now: Instant) -> Option<Pick> {
        if self.is_empty() {
            return None;
        }
        let len = self.len();
        let index = row % len;
        let changed = index != self.selected;
        self.selected = index;
        self.persist();

        let row = if row < len * BAND_COPIES {
            row
        } else {
            len + index
        };
        let target = row_offset(row as i64, self.viewport.container_height);
        self.settle_at = None;
        self.suppress(now, SNAP_SUPPRESS);

        Some(Pick {
            option: self.options[index].clone(),
            changed,
            command: ScrollCommand::smooth(target),
        })
    }

    /// Releases an expired suppression scope and fires a due settle.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollCommand> {
        if self.suppression.is_some_and(|s| now >= s.until) {
            self.suppression = None;
        }
        match self.settle_at {
            Some(at) if now >= at => self.on_settle(now),
            _ => None,
        }
    }

    pub fn cancel_timers(&mut self) {
        self.settle_at = None;
        self.suppression = None;
    }

    fn suppress(&mut self, now: Instant, duration: Duration) {
        let until = now + duration;
        let until = self.suppression.map_or(until, |s| s.until.max(until));
        self.suppression = Some(Suppression { until });
    }

    fn persist(&self) {
        if let Err(e) = self.store.set(SELECTION_KEY, &self.selected.to_string()) {
            log::warn!("Failed to persist selection {}: {}", self.selected, e);
        }
    }
}
