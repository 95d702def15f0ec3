//! Observable fetch state
//!
//! A [`Resource`] owns one `{loading, error, data}` state, publishes it on a
//! watch channel and refreshes it from a fetcher keyed by a dependency value.
//!
//! Every fetch takes a sequence number when it is issued. A fetch that
//! completes after a newer one was issued is discarded, so a slow response
//! for an old dependency never overwrites the state of the current one.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::ApiResponse;

const DEFAULT_ERROR: &str = "Unknown error";

/// Snapshot of a resource.
///
/// At most one of `data` and `error` is set, and neither while `loading`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ResourceState<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    fn settled(response: ApiResponse<T>, default_error: &str) -> Self {
        if response.success {
            Self {
                data: response.data,
                loading: false,
                error: None,
            }
        } else {
            Self {
                data: None,
                loading: false,
                error: Some(response.error.unwrap_or_else(|| default_error.to_string())),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        !self.loading && self.error.is_none() && self.data.is_some()
    }
}

type Fetcher<D, T> = Arc<dyn Fn(D) -> BoxFuture<'static, ApiResponse<T>> + Send + Sync>;

struct Inner<D, T> {
    fetcher: Fetcher<D, T>,
    dependency: watch::Sender<D>,
    state: watch::Sender<ResourceState<T>>,
    issued: AtomicU64,
}

impl<D, T> Inner<D, T> {
    /// Applies `response` unless a newer fetch was issued. The check runs
    /// under the state lock, the same lock `refetch` issues under.
    fn complete(&self, seq: u64, response: ApiResponse<T>, default_error: &str) {
        self.state.send_if_modified(|state| {
            let latest = self.issued.load(Ordering::SeqCst);
            if seq != latest {
                debug!(seq, latest, "Discarding superseded response");
                return false;
            }
            *state = ResourceState::settled(response, default_error);
            true
        });
    }
}

/// Observable, refetchable state for one remote resource.
///
/// Cloning yields another handle to the same state.
pub struct Resource<D, T> {
    inner: Arc<Inner<D, T>>,
    default_error: &'static str,
}

impl<D, T> Clone for Resource<D, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            default_error: self.default_error,
        }
    }
}

impl<D, T> Resource<D, T>
where
    D: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates a resource that starts out loading, as it will be fetched on
    /// [`mount`](Self::mount).
    pub fn new<F, Fut>(dependency: D, fetcher: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResponse<T>> + Send + 'static,
    {
        Self::build(dependency, fetcher, ResourceState::loading())
    }

    /// Creates a resource that stays idle until explicitly fetched.
    pub fn idle<F, Fut>(dependency: D, fetcher: F) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResponse<T>> + Send + 'static,
    {
        Self::build(dependency, fetcher, ResourceState::idle())
    }

    fn build<F, Fut>(dependency: D, fetcher: F, initial: ResourceState<T>) -> Self
    where
        F: Fn(D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResponse<T>> + Send + 'static,
    {
        let (state, _) = watch::channel(initial);
        let (dependency, _) = watch::channel(dependency);
        let fetcher: Fetcher<D, T> = Arc::new(move |dep: D| fetcher(dep).boxed());

        Self {
            inner: Arc::new(Inner {
                fetcher,
                dependency,
                state,
                issued: AtomicU64::new(0),
            }),
            default_error: DEFAULT_ERROR,
        }
    }

    /// Sets the message used when a failed response carries none.
    pub fn with_default_error(mut self, message: &'static str) -> Self {
        self.default_error = message;
        self
    }

    /// Initial fetch.
    pub fn mount(&self) -> impl Future<Output = ()> + Send + 'static {
        self.refetch()
    }

    /// Issues a fetch for the current dependency.
    ///
    /// The state flips to loading and the sequence number is taken right
    /// away; the returned future performs the call and applies the result
    /// unless a newer fetch has been issued in the meantime.
    pub fn refetch(&self) -> impl Future<Output = ()> + Send + 'static {
        let inner = self.inner.clone();
        let default_error = self.default_error;
        let dependency = inner.dependency.borrow().clone();

        let mut seq = 0;
        inner.state.send_modify(|state| {
            seq = inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ResourceState::loading();
        });
        let request = (inner.fetcher)(dependency);

        async move {
            let response = request.await;
            inner.complete(seq, response, default_error);
        }
    }

    /// Runs [`refetch`](Self::refetch) on the current tokio runtime.
    pub fn spawn_refetch(&self) -> JoinHandle<()> {
        tokio::spawn(self.refetch())
    }

    /// Replaces the dependency without fetching. Returns whether it changed.
    pub fn update_dependency(&self, dependency: D) -> bool {
        self.inner.dependency.send_if_modified(|current| {
            if *current == dependency {
                false
            } else {
                *current = dependency;
                true
            }
        })
    }

    /// Replaces the dependency and refetches if it changed.
    pub fn set_dependency(&self, dependency: D) -> BoxFuture<'static, ()> {
        if self.update_dependency(dependency) {
            self.refetch().boxed()
        } else {
            futures::future::ready(()).boxed()
        }
    }

    pub fn dependency(&self) -> D {
        self.inner.dependency.borrow().clone()
    }

    /// Current state snapshot.
    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }
}
