//! Observability utilities.
//!
//! The engine reports through `tracing`; these helpers install a subscriber
//! and open the spans used by the entry points.

mod subscriber;

pub use subscriber::{init_tracing, validation_span, TracingConfig};
