//! Metrics and application hooks backed by the caching service.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;

use super::{Resource, ResourceState};
use crate::models::ApiResponse;
use crate::service::{DashboardService, APPLICATIONS_KEY};
use crate::synthetic::{Application, MetricsRange, MetricsResponse};

/// Aggregated metrics for a selectable range. Starts on 30d.
#[derive(Clone)]
pub struct MetricsHook {
    resource: Resource<MetricsRange, Arc<MetricsResponse>>,
    service: Arc<DashboardService>,
}

impl MetricsHook {
    pub fn new(service: Arc<DashboardService>) -> Self {
        let fetch_service = service.clone();
        let resource = Resource::new(MetricsRange::default(), move |range| {
            let service = fetch_service.clone();
            async move { ApiResponse::ok(service.fetch_metrics(range).await) }
        })
        .with_default_error("Failed to fetch metrics");

        Self { resource, service }
    }

    pub fn mount(&self) -> impl Future<Output = ()> + Send + 'static {
        self.resource.mount()
    }

    pub fn refetch(&self) -> impl Future<Output = ()> + Send + 'static {
        self.resource.refetch()
    }

    pub fn range(&self) -> MetricsRange {
        self.resource.dependency()
    }

    /// Switches range, refetching when it differs from the current one.
    pub fn set_range(&self, range: MetricsRange) -> BoxFuture<'static, ()> {
        self.resource.set_dependency(range)
    }

    pub fn state(&self) -> ResourceState<Arc<MetricsResponse>> {
        self.resource.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Arc<MetricsResponse>>> {
        self.resource.subscribe()
    }

    /// Drops every cached response, not just metrics.
    pub async fn clear_cache(&self) {
        self.service.clear_cache(None).await;
    }
}

/// Registered applications.
#[derive(Clone)]
pub struct ApplicationsHook {
    resource: Resource<(), Arc<Vec<Application>>>,
    service: Arc<DashboardService>,
}

impl ApplicationsHook {
    pub fn new(service: Arc<DashboardService>) -> Self {
        let fetch_service = service.clone();
        let resource = Resource::new((), move |_| {
            let service = fetch_service.clone();
            async move { ApiResponse::ok(service.fetch_applications().await) }
        })
        .with_default_error("Failed to fetch applications");

        Self { resource, service }
    }

    pub fn mount(&self) -> impl Future<Output = ()> + Send + 'static {
        self.resource.mount()
    }

    pub fn refetch(&self) -> impl Future<Output = ()> + Send + 'static {
        self.resource.refetch()
    }

    pub fn state(&self) -> ResourceState<Arc<Vec<Application>>> {
        self.resource.state()
    }

    /// Application list, empty until the first fetch lands.
    pub fn applications(&self) -> Arc<Vec<Application>> {
        self.resource.state().data.unwrap_or_default()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Arc<Vec<Application>>>> {
        self.resource.subscribe()
    }

    pub async fn clear_cache(&self) {
        self.service.clear_cache(Some(APPLICATIONS_KEY)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::test_support::FakeTransport;

    fn service(fake: Arc<FakeTransport>) -> Arc<DashboardService> {
        Arc::new(DashboardService::with_clock(fake, Arc::new(ManualClock::new(0))))
    }

    #[tokio::test]
    async fn test_metrics_hook_defaults_to_thirty_days() {
        let hook = MetricsHook::new(service(Arc::new(FakeTransport::healthy())));
        assert_eq!(hook.range(), MetricsRange::Last30d);
        assert!(hook.state().loading);

        hook.mount().await;

        let state = hook.state();
        assert!(state.is_success());
        assert_eq!(state.data.unwrap().data.len(), 30);
    }

    #[tokio::test]
    async fn test_metrics_hook_range_change_refetches() {
        let fake = Arc::new(FakeTransport::healthy());
        let hook = MetricsHook::new(service(fake.clone()));
        hook.mount().await;

        hook.set_range(MetricsRange::Last7d).await;
        assert_eq!(hook.state().data.unwrap().data.len(), 7);
        assert_eq!(fake.probes(), 2);

        // Going back to 30d is a cache hit
        hook.set_range(MetricsRange::Last30d).await;
        assert_eq!(hook.state().data.unwrap().data.len(), 30);
        assert_eq!(fake.probes(), 2);
    }

    #[tokio::test]
    async fn test_metrics_hook_clear_cache_forces_probe() {
        let fake = Arc::new(FakeTransport::healthy());
        let hook = MetricsHook::new(service(fake.clone()));
        hook.mount().await;

        hook.clear_cache().await;
        hook.refetch().await;
        assert_eq!(fake.probes(), 2);
    }

    #[tokio::test]
    async fn test_applications_hook_with_backend_down() {
        let hook = ApplicationsHook::new(service(Arc::new(FakeTransport::unhealthy())));
        assert!(hook.applications().is_empty());

        hook.mount().await;

        let state = hook.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(hook.applications().len(), 54);
    }

    #[tokio::test]
    async fn test_applications_hook_clear_cache_keeps_metrics() {
        let fake = Arc::new(FakeTransport::healthy());
        let service = service(fake.clone());
        let apps = ApplicationsHook::new(service.clone());
        let metrics = MetricsHook::new(service.clone());

        apps.mount().await;
        metrics.mount().await;
        apps.clear_cache().await;

        assert_eq!(service.cache_stats().await.keys, vec!["metrics-30d".to_string()]);
    }
}
