//! Inbound adapters driving the domain (HTTP today).

pub mod http;
