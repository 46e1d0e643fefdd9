//! Report module - rendering and exporting analysis results

pub mod export;
pub mod tables;

pub use export::*;
pub use tables::*;
