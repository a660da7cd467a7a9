/// The colored-triangle program.
///
/// Compiles `assets/shaders/triangle.wgsl` against the shared
/// [`PipelineLayouts`] and the [`Vertex`] layout.  Compilation and link
/// errors are caught in a validation error scope and returned instead of
/// reaching wgpu's uncaptured-error handler, which would panic.
use crate::error::RenderError;
use crate::geometry::Vertex;
use crate::pipeline::PipelineLayouts;
use crate::render_target::DepthTarget;

/// Depth state for the face.  Hands and ticks lie on one plane but are
/// rasterized from different vertex sets, so their interpolated depths
/// differ by rounding; a real depth test would let that noise reject part
/// of a later draw.  Submission order alone decides what is on top.
pub(crate) fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DepthTarget::FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::Always,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub struct TrianglePipeline {
    pub inner: wgpu::RenderPipeline,
}

impl TrianglePipeline {
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        layouts: &PipelineLayouts,
    ) -> Result<Self, RenderError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../../../assets/shaders/triangle.wgsl"
        ));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Triangle Pipeline Layout"),
            bind_group_layouts: &[&layouts.transform],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Triangle Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // the dial is seen from behind (-Z); both windings must show
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ProgramCreation(err.to_string()));
        }
        Ok(Self { inner: pipeline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_never_rejects_a_later_draw() {
        let state = depth_state();
        assert!(!state.depth_write_enabled);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::Always);
        assert_eq!(state.format, DepthTarget::FORMAT);
        assert!(!state.stencil.is_enabled());
        assert_eq!(state.bias.constant, 0);
    }
}
