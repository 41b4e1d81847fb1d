//! Application state.

use jobly_db::{JobRepo, PgJobRepo};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub job_repo: Arc<dyn JobRepo>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self::with_job_repo(Arc::new(PgJobRepo::new(pool)))
    }

    pub fn with_job_repo(job_repo: Arc<dyn JobRepo>) -> Self {
        Self { job_repo }
    }
}
