//! Dashboard data service
//!
//! Owns the response cache and the synthetic dataset. Cache misses probe the
//! backend, pick a [`DataSource`], compute the value and store it.
//!
//! Concurrent misses on the same key are not deduplicated: both probe, both
//! write, and the last write wins. The values are identical so the only cost
//! is the extra probe.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::DataSource;
use crate::cache::{CacheStats, Clock, ResponseCache, SharedCache};
use crate::client::SdkTransport;
use crate::models::{ApiResponse, DeviceInfo, EventType, SdkInitResponse, TrackEventPayload};
use crate::synthetic::{Application, MetricsRange, MetricsResponse, SyntheticDataset};

/// Cache key of the application list.
pub const APPLICATIONS_KEY: &str = "applications";

/// Payloads the service caches.
#[derive(Debug, Clone)]
pub enum CachedResource {
    Metrics(Arc<MetricsResponse>),
    Applications(Arc<Vec<Application>>),
}

/// Read-through cache over the dashboard resources.
pub struct DashboardService {
    transport: Arc<dyn SdkTransport>,
    cache: SharedCache<CachedResource>,
    dataset: SyntheticDataset,
}

impl DashboardService {
    /// Creates a service with a fresh wall-clock cache.
    pub fn new(transport: Arc<dyn SdkTransport>) -> Self {
        Self::with_cache(transport, ResponseCache::new().shared())
    }

    /// Creates a service whose cache reads time from `clock`.
    pub fn with_clock(transport: Arc<dyn SdkTransport>, clock: Arc<dyn Clock>) -> Self {
        Self::with_cache(transport, ResponseCache::with_clock(clock).shared())
    }

    /// Creates a service around an existing cache.
    pub fn with_cache(transport: Arc<dyn SdkTransport>, cache: SharedCache<CachedResource>) -> Self {
        Self {
            transport,
            cache,
            dataset: SyntheticDataset::new(),
        }
    }

    // == Source Selection ==
    /// Probes backend health and picks where a miss is served from.
    pub async fn resolve_source(&self) -> DataSource {
        let probe = self.transport.health_check().await;
        let source = DataSource::from_probe(&probe);

        match source {
            DataSource::Remote => info!("Backend is healthy"),
            DataSource::SyntheticFallback => warn!(
                error = probe.error_or("Backend health check failed"),
                "Backend unavailable, serving synthetic data"
            ),
        }

        source
    }

    async fn cached(&self, key: &str) -> Option<CachedResource> {
        self.cache.write().await.get(key)
    }

    async fn store(&self, key: &str, value: CachedResource) {
        self.cache.write().await.insert(key, value);
    }

    // == Fetch Metrics ==
    /// Aggregated metrics for `range`. Never fails.
    pub async fn fetch_metrics(&self, range: MetricsRange) -> Arc<MetricsResponse> {
        let key = range.cache_key();

        if let Some(CachedResource::Metrics(metrics)) = self.cached(&key).await {
            debug!(%range, "Returning cached metrics");
            return metrics;
        }

        let source = self.resolve_source().await;
        let metrics = Arc::new(self.load_metrics(source, range));

        self.store(&key, CachedResource::Metrics(metrics.clone())).await;
        metrics
    }

    // == Fetch Applications ==
    /// Registered applications. Never fails.
    pub async fn fetch_applications(&self) -> Arc<Vec<Application>> {
        if let Some(CachedResource::Applications(apps)) = self.cached(APPLICATIONS_KEY).await {
            debug!("Returning cached applications");
            return apps;
        }

        let source = self.resolve_source().await;
        let apps = Arc::new(self.load_applications(source));

        self.store(APPLICATIONS_KEY, CachedResource::Applications(apps.clone()))
            .await;
        apps
    }

    fn load_metrics(&self, source: DataSource, range: MetricsRange) -> MetricsResponse {
        match source {
            // TODO: aggregate from the backend once it exposes a metrics endpoint
            DataSource::Remote => self.dataset.metrics(range),
            DataSource::SyntheticFallback => self.dataset.metrics(range),
        }
    }

    fn load_applications(&self, source: DataSource) -> Vec<Application> {
        match source {
            // TODO: read GET /v1/apps once the backend serves it
            DataSource::Remote => self.dataset.applications().to_vec(),
            DataSource::SyntheticFallback => self.dataset.applications().to_vec(),
        }
    }

    // == Clear Cache ==
    /// Evicts `key`, or every entry when `None`.
    pub async fn clear_cache(&self, key: Option<&str>) {
        let mut cache = self.cache.write().await;
        match key {
            Some(key) => {
                cache.remove(key);
                info!(key, "Cache cleared");
            }
            None => {
                let count = cache.clear();
                info!(count, "Cache cleared");
            }
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Pass-through Calls ==
    /// Reports an event. Failures are logged and returned, never faked.
    pub async fn track_event(
        &self,
        event_type: EventType,
        mut payload: TrackEventPayload,
    ) -> ApiResponse<Value> {
        payload.event_type = event_type;
        if payload.device_id.is_empty() {
            payload.device_id = "unknown".to_string();
        }

        let response = self.transport.track_event(&payload).await;
        if !response.success {
            warn!(
                %event_type,
                error = response.error_or("unknown"),
                "Failed to track event"
            );
        }
        response
    }

    /// Opens an SDK session. Returns `None` when initialization failed.
    pub async fn initialize_sdk(&self, device: &DeviceInfo) -> Option<SdkInitResponse> {
        let response = self.transport.init(device).await;
        if response.success {
            info!(device_id = %device.device_id, "SDK initialized successfully");
            response.data
        } else {
            warn!(error = response.error_or("unknown"), "SDK initialization failed");
            None
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, CACHE_TTL};
    use crate::test_support::{sample_device, FakeTransport};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn service(fake: Arc<FakeTransport>) -> (DashboardService, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let service = DashboardService::with_clock(fake, Arc::new(clock.clone()));
        (service, clock)
    }

    #[tokio::test]
    async fn test_second_fetch_within_ttl_is_cache_hit() {
        for range in MetricsRange::ALL {
            let fake = Arc::new(FakeTransport::healthy());
            let (service, _) = service(fake.clone());

            let first = service.fetch_metrics(range).await;
            let second = service.fetch_metrics(range).await;

            assert_eq!(fake.probes(), 1, "range {range}");
            assert!(Arc::ptr_eq(&first, &second));
        }
    }

    #[tokio::test]
    async fn test_seven_day_timeline() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, clock) = service(fake.clone());

        // t = 0: miss
        service.fetch_metrics(MetricsRange::Last7d).await;
        assert_eq!(fake.probes(), 1);

        // t = 120s: hit
        clock.advance(Duration::from_secs(120));
        service.fetch_metrics(MetricsRange::Last7d).await;
        assert_eq!(fake.probes(), 1);

        // t = 400s: expired at 300s, miss again
        clock.advance(Duration::from_secs(280));
        service.fetch_metrics(MetricsRange::Last7d).await;
        assert_eq!(fake.probes(), 2);
    }

    #[tokio::test]
    async fn test_fetch_after_ttl_probes_again() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, clock) = service(fake.clone());

        service.fetch_applications().await;
        clock.advance(CACHE_TTL);
        service.fetch_applications().await;

        assert_eq!(fake.probes(), 2);
    }

    #[tokio::test]
    async fn test_ranges_are_cached_independently() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, _) = service(fake.clone());

        let day = service.fetch_metrics(MetricsRange::Last24h).await;
        let month = service.fetch_metrics(MetricsRange::Last30d).await;
        let day_again = service.fetch_metrics(MetricsRange::Last24h).await;

        assert_eq!(fake.probes(), 2);
        assert!(Arc::ptr_eq(&day, &day_again));
        assert_ne!(day.data.len(), month.data.len());
    }

    #[tokio::test]
    async fn test_unhealthy_backend_falls_back_silently() {
        let fake = Arc::new(FakeTransport::unhealthy());
        let (service, _) = service(fake.clone());

        let metrics = service.fetch_metrics(MetricsRange::Last30d).await;
        let apps = service.fetch_applications().await;

        assert_eq!(metrics.data.len(), 30);
        assert!(metrics.total_requests > 0);
        assert_eq!(apps.len(), 54);

        // Fallback results are cached as well
        service.fetch_applications().await;
        assert_eq!(fake.probes(), 2);
    }

    #[tokio::test]
    async fn test_resolve_source_follows_probe() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, _) = service(fake.clone());

        assert_eq!(service.resolve_source().await, DataSource::Remote);
        fake.set_healthy(false);
        assert_eq!(service.resolve_source().await, DataSource::SyntheticFallback);
    }

    #[tokio::test]
    async fn test_clear_single_key() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, _) = service(fake.clone());

        service.fetch_metrics(MetricsRange::Last7d).await;
        service.fetch_applications().await;
        service.clear_cache(Some("metrics-7d")).await;

        let stats = service.cache_stats().await;
        assert_eq!(stats.keys, vec![APPLICATIONS_KEY.to_string()]);

        service.fetch_metrics(MetricsRange::Last7d).await;
        service.fetch_applications().await;
        assert_eq!(fake.probes(), 3);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, _) = service(fake.clone());

        for range in MetricsRange::ALL {
            service.fetch_metrics(range).await;
        }
        service.fetch_applications().await;
        assert_eq!(service.cache_stats().await.size, 4);

        service.clear_cache(None).await;
        assert_eq!(service.cache_stats().await.size, 0);

        service.fetch_metrics(MetricsRange::Last24h).await;
        assert_eq!(fake.probes(), 5);
    }

    #[tokio::test]
    async fn test_track_event_surfaces_failure() {
        let fake = Arc::new(FakeTransport::unhealthy());
        let (service, _) = service(fake.clone());

        let payload = TrackEventPayload::new(EventType::Click, "", "sess");
        let response = service.track_event(EventType::Click, payload).await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("HTTP 503: Service Unavailable"));
    }

    #[tokio::test]
    async fn test_track_event_overrides_type() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, _) = service(fake.clone());

        let payload = TrackEventPayload::new(EventType::Click, "dev", "sess");
        let response = service.track_event(EventType::Reward, payload).await;

        assert_eq!(response.data.unwrap()["eventType"], "reward");
        assert_eq!(fake.tracked.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_initialize_sdk() {
        let fake = Arc::new(FakeTransport::healthy());
        let (service, _) = service(fake.clone());

        let init = service.initialize_sdk(&sample_device("d1")).await;
        assert_eq!(init.unwrap().session_id, "sess_d1");

        fake.set_healthy(false);
        assert!(service.initialize_sdk(&sample_device("d1")).await.is_none());
    }
}
