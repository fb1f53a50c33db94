//! docemit - Writes a compiled-in manifest of Markdown documentation files

pub mod catalog;
pub mod commands;
pub mod config;
pub mod emitter;
pub mod models;
pub mod render;
