/// Vertex type shared by every triangle list on the face.
///
/// Seven contiguous `f32`s (position xyz + RGBA), 28 bytes, so `bytemuck`
/// can reinterpret a slice as the raw upload bytes.  The matching WGSL
/// attribute locations are declared in `assets/shaders/triangle.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Face-space position; the dial lies in the z = 0 plane.
    pub position: [f32; 3],
    /// RGBA, each channel in `[0, 1]`.
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: wgpu::BufferAddress = std::mem::size_of::<Vertex>() as wgpu::BufferAddress;

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
    ];

    #[inline]
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Returns the `VertexBufferLayout` that matches this struct's memory
    /// layout.
    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
