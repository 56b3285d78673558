pub mod catalog;
pub mod config;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod macros;
pub mod menu;
pub mod sys;
