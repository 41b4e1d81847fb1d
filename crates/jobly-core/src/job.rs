//! Job records and the inputs used to create, update and filter them.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, JobId, Result};

/// A job posting belonging to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub salary: Option<i32>,
    /// Fraction of the company offered, in `[0, 1]`. Serialized as a string
    /// so the stored precision survives JSON.
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Input for creating a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        if self.company_handle.trim().is_empty() {
            return Err(Error::InvalidInput(
                "companyHandle must not be empty".to_string(),
            ));
        }
        validate_salary(self.salary)?;
        validate_equity(self.equity)
    }
}

/// A partial update of a job.
///
/// Each field is tri-state: `None` leaves the column alone, `Some(None)`
/// clears a nullable column, `Some(Some(v))` sets it. The id and company
/// handle are not part of this type; a request naming them fails to
/// deserialize.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }

    /// Check the supplied values. An empty update is valid here; the
    /// repository rejects it.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_salary(self.salary.flatten())?;
        validate_equity(self.equity.flatten())
    }
}

/// Criteria for listing jobs. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring of the title.
    pub title_like: Option<String>,
    /// Inclusive lower bound on salary.
    pub min_salary: Option<i32>,
    /// `Some(true)` keeps only jobs with non-zero equity; `Some(false)`
    /// behaves like `None`.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn validate(&self) -> Result<()> {
        match self.min_salary {
            Some(min) if min < 0 => Err(Error::InvalidInput(
                "minSalary must not be negative".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

// Distinguishes an explicit `null` from an absent field; paired with
// `#[serde(default)]` the absent case stays `None`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_salary(salary: Option<i32>) -> Result<()> {
    match salary {
        Some(salary) if salary < 0 => Err(Error::InvalidInput(format!(
            "salary must not be negative, got {}",
            salary
        ))),
        _ => Ok(()),
    }
}

fn validate_equity(equity: Option<Decimal>) -> Result<()> {
    match equity {
        Some(equity) if equity < Decimal::ZERO || equity > Decimal::ONE => Err(
            Error::InvalidInput(format!("equity must be between 0 and 1, got {}", equity)),
        ),
        _ => Ok(()),
    }
}
