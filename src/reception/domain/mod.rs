//! Domain model for goods reception.
//!
//! Reception records are the parallel, simpler entity next to tasks: an
//! append-only intake journal with search, no lifecycle and no change
//! history.

mod error;
mod ids;
mod reception;

pub use error::ReceptionDomainError;
pub use ids::ReceptionId;
pub use reception::{
    ACCEPTED_STATUS, PersistedReceptionData, Reception, ReceptionDraft, ReceptionFilter,
};
