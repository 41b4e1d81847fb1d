//! Repository traits and implementations.

pub mod job;

pub use job::{JobRepo, PgJobRepo};
