use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::forms::repo_types::{FormDetails, NewFormDetails};

#[async_trait]
pub trait FormRepo: Send + Sync {
    async fn insert(&self, form: NewFormDetails) -> anyhow::Result<FormDetails>;
    /// Newest first by `created_at`, ties broken by id, at most `limit` rows.
    async fn find_recent(&self, limit: i64) -> anyhow::Result<Vec<FormDetails>>;
}

#[derive(Clone)]
pub struct PgFormRepo {
    db: PgPool,
}

impl PgFormRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FormRepo for PgFormRepo {
    async fn insert(&self, form: NewFormDetails) -> anyhow::Result<FormDetails> {
        let row = sqlx::query_as::<_, FormDetails>(
            r#"
            INSERT INTO form_details
                (full_name, email, pickup_location, dropoff_location,
                 pickup_datetime, return_datetime, car_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, full_name, email, pickup_location, dropoff_location,
                      pickup_datetime, return_datetime, car_type, created_at
            "#,
        )
        .bind(form.full_name)
        .bind(form.email)
        .bind(form.pickup_location)
        .bind(form.dropoff_location)
        .bind(form.pickup_date_time)
        .bind(form.return_date_time)
        .bind(form.car_type)
        .bind(form.created_at)
        .fetch_one(&self.db)
        .await
        .context("insert form details")?;
        Ok(row)
    }

    async fn find_recent(&self, limit: i64) -> anyhow::Result<Vec<FormDetails>> {
        let rows = sqlx::query_as::<_, FormDetails>(
            r#"
            SELECT id, full_name, email, pickup_location, dropoff_location,
                   pickup_datetime, return_datetime, car_type, created_at
              FROM form_details
             ORDER BY created_at DESC, id DESC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list recent form details")?;
        Ok(rows)
    }
}

/// Process-local store used with `DATABASE_URL=memory:` and in tests.
#[derive(Default)]
pub struct InMemoryFormRepo {
    rows: Mutex<Vec<FormDetails>>,
}

#[async_trait]
impl FormRepo for InMemoryFormRepo {
    async fn insert(&self, form: NewFormDetails) -> anyhow::Result<FormDetails> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("form store lock poisoned"))?;
        let stored = FormDetails {
            id: rows.len() as i64 + 1,
            full_name: form.full_name,
            email: form.email,
            pickup_location: form.pickup_location,
            dropoff_location: form.dropoff_location,
            pickup_date_time: form.pickup_date_time,
            return_date_time: form.return_date_time,
            car_type: form.car_type,
            created_at: form.created_at,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_recent(&self, limit: i64) -> anyhow::Result<Vec<FormDetails>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("form store lock poisoned"))?;
        let mut recent = rows.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recent.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(recent)
    }
}
