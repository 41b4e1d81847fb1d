//! Core domain types for the Jobly job board.
//!
//! This crate contains:
//! - Job identifiers
//! - Job records and the inputs used to create, update and filter them
//! - Boundary validation for those inputs

pub mod error;
pub mod id;
pub mod job;

pub use error::{Error, Result};
pub use id::JobId;
pub use job::{Job, JobFilter, JobUpdate, NewJob};
