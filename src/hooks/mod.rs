//! Hooks Module
//!
//! Per-resource state holders the presentation layer observes. Each exposes
//! `{loading, error, data}` plus a way to refetch.

mod action;
mod dashboard;
mod resource;
mod sdk;

pub use action::{ActionState, AdRequestHook, TrackEventHook};
pub use dashboard::{ApplicationsHook, MetricsHook};
pub use resource::{Resource, ResourceState};
pub use sdk::{HealthCheckHook, InitSdkHook};
