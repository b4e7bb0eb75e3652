//! MicroBioBase command-line front end
//!
//! Loading, rendering, export and the interactive loop on top of
//! `microbiobase-common`.

pub mod browse;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod render;
