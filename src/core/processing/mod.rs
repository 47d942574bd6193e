pub mod chroma;
pub mod cut;
pub mod grid;
pub mod pipeline;
pub mod resize;
pub mod validate;
