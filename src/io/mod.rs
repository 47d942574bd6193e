//! I/O layer for reading sheet images and writing sticker outputs.
//! Provides the `loader` for PNG/JPEG sheet decoding into the core buffer
//! model, and `writers` for PNG/JPEG outputs and the JSON metadata sidecar.
pub mod loader;
pub use loader::{load_sheet, sheet_from_dynamic};

pub mod writers;
