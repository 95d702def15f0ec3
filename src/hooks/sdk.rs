//! Hooks that talk to the transport directly. Failures surface as the error
//! state; nothing here falls back to synthetic data.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;

use super::{Resource, ResourceState};
use crate::client::SdkTransport;
use crate::models::{ApiResponse, DeviceInfo, HealthCheckResponse, SdkInitResponse};

/// Backend health, probed on mount.
#[derive(Clone)]
pub struct HealthCheckHook {
    resource: Resource<(), HealthCheckResponse>,
}

impl HealthCheckHook {
    pub fn new(transport: Arc<dyn SdkTransport>) -> Self {
        let resource = Resource::new((), move |_| {
            let transport = transport.clone();
            async move { transport.health_check().await }
        });
        Self { resource }
    }

    pub fn mount(&self) -> impl Future<Output = ()> + Send + 'static {
        self.resource.mount()
    }

    pub fn refetch(&self) -> impl Future<Output = ()> + Send + 'static {
        self.resource.refetch()
    }

    pub fn state(&self) -> ResourceState<HealthCheckResponse> {
        self.resource.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<HealthCheckResponse>> {
        self.resource.subscribe()
    }
}

/// SDK session initialization. Idle until [`initialize`](Self::initialize)
/// is called with device info set.
#[derive(Clone)]
pub struct InitSdkHook {
    resource: Resource<Option<DeviceInfo>, SdkInitResponse>,
}

impl InitSdkHook {
    pub fn new(transport: Arc<dyn SdkTransport>, device: Option<DeviceInfo>) -> Self {
        let resource = Resource::idle(device, move |device: Option<DeviceInfo>| {
            let transport = transport.clone();
            async move {
                match device {
                    Some(device) => transport.init(&device).await,
                    None => ApiResponse::err("Device info is required"),
                }
            }
        })
        .with_default_error("Initialization failed");

        Self { resource }
    }

    /// Replaces the device info. Does not initialize.
    pub fn set_device(&self, device: Option<DeviceInfo>) {
        self.resource.update_dependency(device);
    }

    /// Opens a session for the current device. No-op without device info.
    pub fn initialize(&self) -> BoxFuture<'static, ()> {
        if self.resource.dependency().is_none() {
            return futures::future::ready(()).boxed();
        }
        self.resource.refetch().boxed()
    }

    pub fn state(&self) -> ResourceState<SdkInitResponse> {
        self.resource.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<SdkInitResponse>> {
        self.resource.subscribe()
    }
}
