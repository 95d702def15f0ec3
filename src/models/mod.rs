//! Models Module
//!
//! Wire types exchanged with the SDK backend.

mod envelope;
mod requests;
mod responses;

// Re-export all models
pub use envelope::*;
pub use requests::*;
pub use responses::*;
