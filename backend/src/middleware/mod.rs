//! Actix middleware shared by all inbound HTTP surfaces.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
