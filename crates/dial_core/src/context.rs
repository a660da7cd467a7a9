use std::sync::Arc;

use anyhow::Context as _;
use thiserror::Error;

/// The wgpu objects that make up one graphics context.
///
/// A watch face treats the context as disposable: when the host loses it
/// (suspend, display power-down) every GPU resource derived from it is
/// dropped and rebuilt from a fresh `EngineContext`.  `Device` and `Queue`
/// are `Arc`-wrapped so the backend and the surface setup can both hold
/// them.
pub struct EngineContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no suitable graphics adapter found")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    DeviceRequest(String),
}

impl EngineContext {
    /// Creates a context on an existing `Instance`, optionally requiring the
    /// adapter to be able to present to `compatible_surface`.
    ///
    /// Wearable displays favour battery life over throughput, so the
    /// low-power adapter is requested.
    pub async fn new_with_instance(
        instance: wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .context(ContextError::AdapterUnavailable)?;

        let info = adapter.get_info();
        log::info!("selected adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Dial Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| ContextError::DeviceRequest(e.to_string()))?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}
