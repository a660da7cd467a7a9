pub mod layout;
pub mod triangle;

pub use layout::PipelineLayouts;
pub use triangle::TrianglePipeline;
