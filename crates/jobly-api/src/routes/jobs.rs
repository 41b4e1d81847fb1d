//! Job management endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;
use crate::error::ApiError;
use jobly_core::{Job, JobFilter, JobId, JobUpdate, NewJob};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/{id}", get(get_job).patch(update_job).delete(delete_job))
}

#[derive(Debug, Serialize)]
struct JobResponse {
    job: Job,
}

#[derive(Debug, Serialize)]
struct JobListResponse {
    jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: String,
}

async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let job = state.job_repo.create(&req).await?;
    tracing::info!(job_id = %job.id, company = %job.company_handle, "Created job");
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

async fn list_jobs(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<JobListResponse>, ApiError> {
    let Query(filter) = query?;
    filter.validate()?;

    let jobs = state.job_repo.find_all(&filter).await?;
    Ok(Json(JobListResponse { jobs }))
}

async fn get_job(
    State(state): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
) -> Result<Json<JobResponse>, ApiError> {
    let Path(id) = path?;
    let job = state.job_repo.get(id).await?;
    Ok(Json(JobResponse { job }))
}

async fn update_job(
    State(state): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
    payload: Result<Json<JobUpdate>, JsonRejection>,
) -> Result<Json<JobResponse>, ApiError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    changes.validate()?;

    let job = state.job_repo.update(id, &changes).await?;
    tracing::info!(job_id = %id, "Updated job");
    Ok(Json(JobResponse { job }))
}

async fn delete_job(
    State(state): State<AppState>,
    path: Result<Path<JobId>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = path?;
    state.job_repo.remove(id).await?;
    tracing::info!(job_id = %id, "Deleted job");
    Ok(Json(DeletedResponse {
        deleted: id.to_string(),
    }))
}
