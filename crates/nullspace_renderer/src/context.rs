//! Adapter and device for a window surface.

use std::sync::Arc;

use thiserror::Error;

/// Device and queue shared by the renderer and the application shell.
///
/// Both are `Arc`-wrapped so the buffer allocator can hold its own handle
/// while the renderer keeps the context.
pub struct EngineContext {
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no GPU adapter can present to this window")]
    AdapterUnavailable,
    #[error("device request on {adapter} failed: {reason}")]
    DeviceRequest { adapter: String, reason: String },
}

impl EngineContext {
    /// Opens a device on the first high-performance adapter able to present
    /// to `surface`.
    pub async fn for_surface(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<Self, ContextError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterUnavailable)?;

        let summary = adapter_summary(&adapter.get_info());
        log::info!("selected adapter: {summary}");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Nullspace Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| ContextError::DeviceRequest {
                adapter: summary,
                reason: e.to_string(),
            })?;

        Ok(Self {
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}

/// One-line `name (backend, device type)` description for logs and errors.
pub fn adapter_summary(info: &wgpu::AdapterInfo) -> String {
    format!("{} ({:?}, {:?})", info.name, info.backend, info.device_type)
}
