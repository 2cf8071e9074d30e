//! Meet Tour — guided-tour overlay plugin for a web conferencing client.
//!
//! Highlights UI elements in sequence with contextual tooltips. The engine
//! is a declarative feature/step catalog driven by a small controller state
//! machine; the hosting client stays behind the traits in [`host`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod i18n;
pub mod tour;
