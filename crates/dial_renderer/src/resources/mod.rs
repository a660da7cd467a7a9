pub mod buffer;
pub mod model_buffer;
pub mod texture;

pub use buffer::VertexBuffer;
pub use model_buffer::ModelBuffer;
