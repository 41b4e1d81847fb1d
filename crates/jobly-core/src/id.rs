//! Job identifiers.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Surrogate key of a job row. Assigned by the store on insert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct JobId(i32);

impl JobId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer key.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<JobId> for i32 {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl std::str::FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
