//! # Utility Modules
//!
//! Supporting utilities for logging, timing, and tracing hooks.
//!
//! ## Components
//! - **Logging**: Structured logging configuration
//! - **Observer**: Injectable frame/payload trace hooks
//! - **Time**: UNIX-second timestamps for the frame header
//! - **Timeout**: Async timeout wrappers

pub mod logging;
pub mod observer;
pub mod time;
pub mod timeout;

// Re-export the observer surface for callers wiring up tracing.
pub use observer::{TraceObserver, TracingObserver};
