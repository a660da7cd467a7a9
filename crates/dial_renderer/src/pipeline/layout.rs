/// Bind-group layouts shared by every triangle program of a context.

#[derive(Clone)]
pub struct PipelineLayouts {
    /// group(0): the draw's MVP matrix via a **dynamic** uniform buffer.
    ///
    /// One buffer is bound per frame and each draw supplies its own byte
    /// offset, so switching transforms never switches bind groups.
    pub transform: std::sync::Arc<wgpu::BindGroupLayout>,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let transform = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Layout: Transform (dynamic)"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    // mat4x4<f32> = 64 bytes
                    min_binding_size: wgpu::BufferSize::new(64),
                },
                count: None,
            }],
        });

        Self { transform: std::sync::Arc::new(transform) }
    }
}
