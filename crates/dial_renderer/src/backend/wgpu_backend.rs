//! `GraphicsApi` on top of wgpu, presenting to a window surface.
//!
//! Draw calls are collected between `begin_frame` and `end_frame` and
//! encoded into one render pass, in submission order, when the frame ends.
//! Their MVPs go into a dynamic-offset uniform buffer written once per
//! frame.
use std::sync::Arc;

use glam::Mat4;

use dial_core::context::EngineContext;
use dial_core::Color;

use super::{BufferHandle, DrawCall, GraphicsApi, ProgramHandle};
use crate::error::RenderError;
use crate::geometry::Vertex;
use crate::pipeline::{PipelineLayouts, TrianglePipeline};
use crate::render_target::DepthTarget;
use crate::resources::{ModelBuffer, VertexBuffer};

/// Maps GL clip space (z in `[-w, w]`) onto wgpu's (z in `[0, w]`).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Enough slots for one full interactive frame.
const INITIAL_DRAW_SLOTS: usize = 8;

struct PendingFrame {
    clear: Color,
    draws: Vec<DrawCall>,
}

pub struct WgpuBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    layouts: PipelineLayouts,
    /// Indexed by `ProgramHandle`.
    programs: Vec<TrianglePipeline>,
    /// Indexed by `BufferHandle`.
    buffers: Vec<VertexBuffer>,
    mvps: ModelBuffer,
    /// CPU staging for one frame's MVPs, reused across frames.
    mvp_scratch: Vec<Mat4>,
    frame: Option<PendingFrame>,
}

impl WgpuBackend {
    /// Configures `surface` for the context's adapter at `width`×`height`.
    pub fn new(
        context: &EngineContext,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSurface { width, height });
        }
        let mut config = surface
            .get_default_config(&context.adapter, width, height)
            .ok_or_else(|| RenderError::Surface("surface not supported by adapter".into()))?;
        config.present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let device = context.device.clone();
        surface.configure(&device, &config);
        log::info!(
            "surface configured: {}x{} {:?} {:?}",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        let layouts = PipelineLayouts::new(&device);
        let mvps = ModelBuffer::new(&device, &layouts.transform, INITIAL_DRAW_SLOTS);
        let depth = DepthTarget::new(&device, width, height);

        Ok(Self {
            device,
            queue: context.queue.clone(),
            surface,
            config,
            depth,
            layouts,
            programs: Vec::new(),
            buffers: Vec::new(),
            mvps,
            mvp_scratch: Vec::with_capacity(INITIAL_DRAW_SLOTS),
            frame: None,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| RenderError::Surface(e.to_string()))
            }
            Err(e) => Err(RenderError::Surface(e.to_string())),
        }
    }
}

impl GraphicsApi for WgpuBackend {
    fn create_program(&mut self) -> Result<ProgramHandle, RenderError> {
        let pipeline = TrianglePipeline::new(&self.device, self.config.format, &self.layouts)?;
        self.programs.push(pipeline);
        let handle = ProgramHandle(self.programs.len() as u32 - 1);
        log::debug!("triangle program {} ready", handle.0);
        Ok(handle)
    }

    fn upload_vertices(
        &mut self,
        label: &str,
        vertices: &[Vertex],
    ) -> Result<BufferHandle, RenderError> {
        self.buffers.push(VertexBuffer::new(&self.device, label, vertices));
        Ok(BufferHandle(self.buffers.len() as u32 - 1))
    }

    fn begin_frame(&mut self, clear: Color) -> Result<(), RenderError> {
        if self.frame.is_some() {
            log::warn!("begin_frame while a frame is open; discarding its draws");
        }
        self.frame = Some(PendingFrame { clear, draws: Vec::with_capacity(INITIAL_DRAW_SLOTS) });
        Ok(())
    }

    fn draw(&mut self, call: DrawCall) -> Result<(), RenderError> {
        let frame = self.frame.as_mut().ok_or(RenderError::NoActiveFrame)?;
        if call.program.0 as usize >= self.programs.len() {
            return Err(RenderError::ProgramUnavailable(call.program.0));
        }
        if call.buffer.0 as usize >= self.buffers.len() {
            return Err(RenderError::BufferUnavailable(call.buffer.0));
        }
        frame.draws.push(call);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let frame = self.frame.take().ok_or(RenderError::NoActiveFrame)?;

        self.mvps
            .ensure_capacity(&self.device, &self.layouts.transform, frame.draws.len());
        self.mvp_scratch.clear();
        self.mvp_scratch
            .extend(frame.draws.iter().map(|d| OPENGL_TO_WGPU * d.mvp));
        self.mvps.write_all(&self.queue, &self.mvp_scratch);

        let output = self.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Face Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (i, call) in frame.draws.iter().enumerate() {
                let program = &self.programs[call.program.0 as usize];
                let vb = &self.buffers[call.buffer.0 as usize];
                rpass.set_pipeline(&program.inner);
                rpass.set_bind_group(0, &self.mvps.bind_group, &[self.mvps.offset(i)]);
                rpass.set_vertex_buffer(0, vb.buffer.slice(..));
                rpass.draw(0..call.vertex_count.min(vb.vertex_count), 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.resize(&self.device, width, height);
        log::debug!("surface reconfigured to {width}x{height}");
    }
}
