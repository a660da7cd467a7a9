/// Depth buffer matching the swapchain size.  Cleared to 1.0 every frame.
use crate::resources::texture::{self, RenderTextureDesc};

pub struct DepthTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (texture, view) = Self::make(device, width, height);
        Self { texture, view }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (t, v) = Self::make(device, width, height);
        self.texture = t;
        self.view    = v;
    }

    fn make(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        let tex = texture::create_render_texture(device, &RenderTextureDesc {
            label: "Depth Texture",
            width,
            height,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        });
        let view = texture::default_view(&tex);
        (tex, view)
    }
}
