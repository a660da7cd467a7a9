use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use dial_core::context::EngineContext;
use dial_renderer::WgpuBackend;

/// Brings up a graphics context presenting to `window`.
///
/// Every call builds a fresh instance, adapter and device; nothing is
/// carried over from a previous context.
pub async fn create_backend(
    window: Arc<Window>,
    width: u32,
    height: u32,
    vsync: bool,
) -> anyhow::Result<WgpuBackend> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    // `Arc<Window>` makes the surface `'static`
    let surface = instance
        .create_surface(window)
        .context("failed to create window surface")?;
    let context = EngineContext::new_with_instance(instance, Some(&surface)).await?;

    let backend = WgpuBackend::new(&context, surface, width, height, vsync)
        .context("failed to configure window surface")?;
    Ok(backend)
}
