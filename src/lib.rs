//! Shopfloor: work-order lifecycle and audit history engine.
//!
//! This crate provides the core of a manufacturing task tracker: tasks
//! move through an open status lifecycle, every field-level change is
//! recorded as a reversible history entry, bulk mutation and row-based
//! import commit per item, and completed tasks are archived after a
//! cooldown window.
//!
//! # Architecture
//!
//! Shopfloor follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, test
//!   doubles)
//!
//! Time is never read ambiently: every service takes a
//! [`mockable::Clock`], so completion stamping and archival cutoffs are
//! deterministic under test.
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, audit history, revert, archival, import
//! - [`reception`]: Goods-reception records, the parallel simpler entity

pub mod reception;
pub mod task;
