//! Goods reception for shopfloor.
//!
//! The parallel, simpler bounded context next to [`crate::task`]:
//! reception records are created and listed, never mutated, so the
//! context has no history ledger and no archival. Layout mirrors the
//! task context:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
