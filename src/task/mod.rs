//! Task lifecycle and audit history for shopfloor.
//!
//! This module is the core bounded context: work-order tasks move
//! through an open status lifecycle, every field-level change is logged
//! to an append-only ledger as a reversible diff, bulk mutation and
//! row-based import apply per-item semantics, and completed tasks are
//! archived after a cooldown. The module follows hexagonal architecture:
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
