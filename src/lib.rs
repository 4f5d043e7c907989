//! Property-panel widgets for the terminal.
//!
//! The two pure cores are [`color`] (HSB, RGB, hex and `rgba()` conversion)
//! and [`mapper`] (pointer position to clamped, stepped value). Widgets in
//! [`fields`] build on them, [`registry`] owns live widgets, [`form`]
//! collects what they submit, and [`tui`] puts them on screen.

pub mod cli;
pub mod color;
pub mod config;
pub mod fields;
pub mod form;
pub mod logging;
pub mod mapper;
pub mod registry;
pub mod tui;
