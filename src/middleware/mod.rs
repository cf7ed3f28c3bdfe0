//! Built-in middleware
//!
//! This module provides:
//! - Tracing of every hook a message passes through
//! - Whitespace trimming of incoming text

mod trace;
mod trim;

pub use trace::TraceMiddleware;
pub use trim::TrimMiddleware;
