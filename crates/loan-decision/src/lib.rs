//! Loan eligibility decisions for applicants identified by an Estonian personal code.
//!
//! The [`decision`] module holds the engine itself; [`config`], [`telemetry`] and [`error`]
//! carry the service plumbing shared with the API binary.

pub mod config;
pub mod decision;
pub mod error;
pub mod telemetry;
