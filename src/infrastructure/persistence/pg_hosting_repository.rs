//! PostgreSQL implementation of the hosting repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::HostingRecord;
use crate::domain::repositories::HostingRepository;
use crate::error::RegistrarError;

#[derive(FromRow)]
struct SubdomainRow {
    id: i64,
    subdomain: String,
    root_dir: String,
    owner: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubdomainRow> for HostingRecord {
    fn from(row: SubdomainRow) -> Self {
        HostingRecord::new(
            row.id,
            row.subdomain,
            row.root_dir,
            row.owner,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL repository for subdomain bindings.
///
/// A subdomain belongs to whoever bound it first. Re-binding by the same owner
/// updates the directory in place.
pub struct PgHostingRepository {
    pool: Arc<PgPool>,
}

impl PgHostingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HostingRepository for PgHostingRepository {
    async fn bind(
        &self,
        owner: &str,
        subdomain: &str,
        root_dir: &str,
    ) -> Result<HostingRecord, RegistrarError> {
        // The conditional upsert returns no row when another owner holds the name.
        let row = sqlx::query_as::<_, SubdomainRow>(
            r#"
            INSERT INTO subdomains (subdomain, root_dir, owner)
            VALUES ($1, $2, $3)
            ON CONFLICT (subdomain) DO UPDATE
                SET root_dir = EXCLUDED.root_dir,
                    updated_at = NOW()
                WHERE subdomains.owner = EXCLUDED.owner
            RETURNING id, subdomain, root_dir, owner, created_at, updated_at
            "#,
        )
        .bind(subdomain)
        .bind(root_dir)
        .bind(owner)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(HostingRecord::from).ok_or_else(|| {
            RegistrarError::conflict(format!("Subdomain '{subdomain}' is already taken"))
        })
    }

    async fn find_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<HostingRecord>, RegistrarError> {
        let row = sqlx::query_as::<_, SubdomainRow>(
            r#"
            SELECT id, subdomain, root_dir, owner, created_at, updated_at
            FROM subdomains
            WHERE subdomain = $1
            "#,
        )
        .bind(subdomain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(HostingRecord::from))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<HostingRecord>, RegistrarError> {
        let rows = sqlx::query_as::<_, SubdomainRow>(
            r#"
            SELECT id, subdomain, root_dir, owner, created_at, updated_at
            FROM subdomains
            WHERE owner = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(HostingRecord::from).collect())
    }

    async fn list(&self) -> Result<Vec<HostingRecord>, RegistrarError> {
        let rows = sqlx::query_as::<_, SubdomainRow>(
            r#"
            SELECT id, subdomain, root_dir, owner, created_at, updated_at
            FROM subdomains
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(HostingRecord::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
