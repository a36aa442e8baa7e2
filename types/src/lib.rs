//! Core domain types for Cupid.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod geometry;
mod proofs;
mod proposal;
mod step;
pub mod ui;

pub use geometry::{ButtonPlacement, Footprint, Viewport};
pub use proofs::{EmptyStringError, NonEmptyString};
pub use proposal::{DraftError, Gender, GenderParseError, Proposal, ProposalDraft};
pub use step::{DeclineCounter, FlowStep};
