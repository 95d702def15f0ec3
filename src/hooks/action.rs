//! Fire-and-report hooks for event tracking and ad requests.
//!
//! These keep only a loading flag and the last error; the envelope itself is
//! returned to the caller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use crate::client::SdkTransport;
use crate::models::{AdRequestParams, AdResponse, ApiResponse, EventType, TrackEventPayload};

/// Loading flag and last error of an action hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Shared bookkeeping: `loading` stays set while any call is in flight.
#[derive(Debug)]
struct ActionTracker {
    in_flight: AtomicUsize,
    state: watch::Sender<ActionState>,
}

impl ActionTracker {
    fn new() -> Self {
        let (state, _) = watch::channel(ActionState::default());
        Self {
            in_flight: AtomicUsize::new(0),
            state,
        }
    }

    fn begin(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(ActionState {
            loading: true,
            error: None,
        });
    }

    fn finish<T>(&self, response: &ApiResponse<T>, default_error: &str) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        self.state.send_modify(|state| {
            state.loading = remaining > 0;
            if !response.success {
                state.error = Some(response.error_or(default_error).to_string());
            }
        });
    }
}

/// Reports SDK events through the transport.
#[derive(Clone)]
pub struct TrackEventHook {
    transport: Arc<dyn SdkTransport>,
    tracker: Arc<ActionTracker>,
}

impl TrackEventHook {
    pub fn new(transport: Arc<dyn SdkTransport>) -> Self {
        Self {
            transport,
            tracker: Arc::new(ActionTracker::new()),
        }
    }

    /// Sends `payload` tagged as `event_type`.
    pub async fn track(
        &self,
        event_type: EventType,
        mut payload: TrackEventPayload,
    ) -> ApiResponse<Value> {
        payload.event_type = event_type;

        self.tracker.begin();
        let response = self.transport.track_event(&payload).await;
        self.tracker.finish(&response, "Failed to track event");
        response
    }

    pub fn state(&self) -> ActionState {
        self.tracker.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.tracker.state.subscribe()
    }
}

/// Requests ads through the transport.
#[derive(Clone)]
pub struct AdRequestHook {
    transport: Arc<dyn SdkTransport>,
    tracker: Arc<ActionTracker>,
}

impl AdRequestHook {
    pub fn new(transport: Arc<dyn SdkTransport>) -> Self {
        Self {
            transport,
            tracker: Arc::new(ActionTracker::new()),
        }
    }

    pub async fn request_ad(&self, params: &AdRequestParams) -> ApiResponse<AdResponse> {
        self.tracker.begin();
        let response = self.transport.request_ad(params).await;
        self.tracker.finish(&response, "Failed to request ad");
        response
    }

    pub fn state(&self) -> ActionState {
        self.tracker.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.tracker.state.subscribe()
    }
}
