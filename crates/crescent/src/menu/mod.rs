use std::time::Duration;

pub mod model;
pub mod option;
pub mod selector;
pub mod store;

pub use model::{Listeners, Menu, MenuBounds, MenuEvent, MenuResponse, Phase};
pub use option::{MenuOption, OptionId, OptionLabel};
pub use selector::{
    CircularSelector, ScrollAction, ScrollBehavior, ScrollCommand, ViewportMetrics,
    restore_selection, row_at_center, row_offset, wrap_index,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub const ITEM_HEIGHT: f64 = 70.0;
pub const BAND_COPIES: usize = 3;
pub const EDGE_MARGIN: f64 = ITEM_HEIGHT / 2.0; // recentre when this close to either end
pub const SNAP_EPSILON: f64 = 0.5;
pub const SELECTION_KEY: &str = "semi-ellipse-selected-index";

pub const SETTLE_DELAY: Duration = Duration::from_millis(150);
pub const LEAVE_SETTLE_DELAY: Duration = Duration::from_millis(100);
pub const EXPAND_SUPPRESS: Duration = Duration::from_millis(50);
pub const JUMP_SUPPRESS: Duration = Duration::from_millis(50);
pub const SNAP_SUPPRESS: Duration = Duration::from_millis(500);
