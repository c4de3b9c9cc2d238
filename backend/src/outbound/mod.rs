//! Outbound adapters driven by the domain.

pub mod identity;
pub mod persistence;
