pub mod builder;
pub mod triangle_list;
pub mod vertex;

pub use triangle_list::TriangleList;
pub use vertex::Vertex;
