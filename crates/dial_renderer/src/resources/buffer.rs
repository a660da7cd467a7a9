/// Thin wrappers over `wgpu::Buffer` creation for the face's immutable
/// vertex data.
use wgpu::util::DeviceExt;

/// Creates a GPU vertex buffer from a slice of `Pod` data.  The contents are
/// fixed for the buffer's lifetime, so no `COPY_DST` usage is requested.
pub fn create_vertex<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// A vertex buffer plus what a draw needs to know about it.
pub struct VertexBuffer {
    pub buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl VertexBuffer {
    pub fn new<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, data: &[T]) -> Self {
        Self {
            buffer: create_vertex(device, label, data),
            vertex_count: data.len() as u32,
        }
    }
}
