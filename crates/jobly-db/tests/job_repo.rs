//! Job repository tests against a live PostgreSQL.
//!
//! Each test gets a fresh database with migrations applied. They need
//! `DATABASE_URL` to point at a server where the user may create databases:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p jobly-db -- --ignored
//! ```

use std::str::FromStr;

use jobly_core::{JobFilter, JobId, JobUpdate, NewJob};
use jobly_db::{DbError, JobRepo, PgJobRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

async fn seed(pool: &PgPool) -> PgJobRepo {
    sqlx::query(
        r#"
        INSERT INTO companies (handle, name, num_employees, description)
        VALUES ('c1', 'C1', 1, 'Desc1'), ('c2', 'C2', 2, 'Desc2'), ('c3', 'C3', 3, 'Desc3')
        "#,
    )
    .execute(pool)
    .await
    .unwrap();

    let repo = PgJobRepo::new(pool.clone());
    repo.create(&new_job("job2", 2, "0.2", "c2")).await.unwrap();
    repo.create(&new_job("job1", 1, "0.1", "c1")).await.unwrap();
    repo
}

fn new_job(title: &str, salary: i32, equity: &str, company_handle: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        salary: Some(salary),
        equity: Some(Decimal::from_str(equity).unwrap()),
        company_handle: company_handle.to_string(),
    }
}

async fn job_id_by_title(pool: &PgPool, title: &str) -> JobId {
    let id: i32 = sqlx::query_scalar("SELECT id FROM jobs WHERE title = $1")
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap();
    JobId::new(id)
}

async fn missing_id(pool: &PgPool) -> JobId {
    let max: Option<i32> = sqlx::query_scalar("SELECT MAX(id) FROM jobs")
        .fetch_one(pool)
        .await
        .unwrap();
    JobId::new(max.unwrap_or(0) + 1)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create(pool: PgPool) {
    let repo = seed(&pool).await;

    let job = repo.create(&new_job("new", 1, "0.1", "c1")).await.unwrap();
    assert_eq!(job.title, "new");
    assert_eq!(job.salary, Some(1));
    assert_eq!(job.equity.unwrap().to_string(), "0.1");
    assert_eq!(job.company_handle, "c1");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate(pool: PgPool) {
    let repo = seed(&pool).await;

    repo.create(&new_job("new", 1, "0.1", "c1")).await.unwrap();
    let err = repo.create(&new_job("new", 1, "0.1", "c1")).await.unwrap_err();
    assert!(matches!(err, DbError::Duplicate(_)));

    // Same title at another company is fine.
    repo.create(&new_job("new", 1, "0.1", "c2")).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_all_no_filter(pool: PgPool) {
    let repo = seed(&pool).await;

    let jobs = repo.find_all(&JobFilter::default()).await.unwrap();
    let summary: Vec<(&str, &str)> = jobs
        .iter()
        .map(|j| (j.title.as_str(), j.company_handle.as_str()))
        .collect();
    assert_eq!(summary, vec![("job1", "c1"), ("job2", "c2")]);
    assert_eq!(jobs[1].equity.unwrap().to_string(), "0.2");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_all_title_like(pool: PgPool) {
    let repo = seed(&pool).await;
    repo.create(&new_job("Senior JOB", 3, "0", "c3")).await.unwrap();

    let filter = JobFilter {
        title_like: Some("2".to_string()),
        ..Default::default()
    };
    let jobs = repo.find_all(&filter).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "job2");

    let filter = JobFilter {
        title_like: Some("job".to_string()),
        ..Default::default()
    };
    let jobs = repo.find_all(&filter).await.unwrap();
    assert_eq!(jobs.len(), 3);

    let filter = JobFilter {
        title_like: Some("%".to_string()),
        ..Default::default()
    };
    assert!(repo.find_all(&filter).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_all_salary_and_equity(pool: PgPool) {
    let repo = seed(&pool).await;
    repo.create(&new_job("job3", 3, "0", "c3")).await.unwrap();

    let filter = JobFilter {
        min_salary: Some(2),
        ..Default::default()
    };
    let titles: Vec<String> = repo
        .find_all(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(titles, vec!["job2", "job3"]);

    let filter = JobFilter {
        min_salary: Some(2),
        has_equity: Some(true),
        ..Default::default()
    };
    let titles: Vec<String> = repo
        .find_all(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(titles, vec!["job2"]);

    let filter = JobFilter {
        min_salary: Some(1000),
        ..Default::default()
    };
    assert!(repo.find_all(&filter).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get(pool: PgPool) {
    let repo = seed(&pool).await;
    let id = job_id_by_title(&pool, "job1").await;

    let job = repo.get(id).await.unwrap();
    assert_eq!(job.id, id);
    assert_eq!(job.title, "job1");
    assert_eq!(job.company_handle, "c1");

    let err = repo.get(missing_id(&pool).await).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update(pool: PgPool) {
    let repo = seed(&pool).await;
    let id = job_id_by_title(&pool, "job1").await;

    let changes = JobUpdate {
        title: Some("New".to_string()),
        salary: Some(Some(100)),
        equity: Some(Some(Decimal::from_str("0.9").unwrap())),
    };
    let job = repo.update(id, &changes).await.unwrap();
    assert_eq!(job.id, id);
    assert_eq!(job.title, "New");
    assert_eq!(job.salary, Some(100));
    assert_eq!(job.equity.unwrap().to_string(), "0.9");
    assert_eq!(job.company_handle, "c1");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_null_fields(pool: PgPool) {
    let repo = seed(&pool).await;
    let id = job_id_by_title(&pool, "job1").await;

    let changes = JobUpdate {
        title: Some("New".to_string()),
        salary: Some(None),
        equity: Some(None),
    };
    let job = repo.update(id, &changes).await.unwrap();
    assert_eq!(job.title, "New");
    assert_eq!(job.salary, None);
    assert_eq!(job.equity, None);
    assert_eq!(job.company_handle, "c1");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_leaves_other_fields(pool: PgPool) {
    let repo = seed(&pool).await;
    let id = job_id_by_title(&pool, "job2").await;

    let changes = JobUpdate {
        salary: Some(Some(5)),
        ..Default::default()
    };
    let job = repo.update(id, &changes).await.unwrap();
    assert_eq!(job.title, "job2");
    assert_eq!(job.salary, Some(5));
    assert_eq!(job.equity.unwrap().to_string(), "0.2");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_errors(pool: PgPool) {
    let repo = seed(&pool).await;
    let id = job_id_by_title(&pool, "job1").await;

    let err = repo.update(id, &JobUpdate::default()).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)));

    let changes = JobUpdate {
        title: Some("New".to_string()),
        ..Default::default()
    };
    let err = repo
        .update(missing_id(&pool).await, &changes)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_remove(pool: PgPool) {
    let repo = seed(&pool).await;
    let id = job_id_by_title(&pool, "job1").await;

    repo.remove(id).await.unwrap();
    let err = repo.get(id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));

    let err = repo.remove(id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgJobRepo::new(pool);
    repo.ping().await.unwrap();
}
