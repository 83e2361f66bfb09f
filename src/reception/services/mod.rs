//! Orchestration services for goods reception.

pub mod intake;

pub use intake::{ReceptionError, ReceptionResult, ReceptionService};
