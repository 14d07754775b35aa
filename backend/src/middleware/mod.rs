//! Request middleware.
//!
//! Purpose: request lifecycle concerns that wrap every handler, currently
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;
