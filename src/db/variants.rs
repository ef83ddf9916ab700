use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::common::StoreError;
use crate::log_err;
use crate::models::{EmailVariant, TestSummary, VariantQuery};
use crate::services::VariantStore;

pub async fn list_variants(
    pool: &PgPool,
    data: &VariantQuery,
) -> Result<Vec<EmailVariant>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT * FROM email_variants WHERE 1 = 1");

    if let Some(test_name) = &data.test_name {
        query_builder
            .push(" AND test_name = ")
            .push_bind(test_name);
    }

    if let Some(paused) = data.auto_selection_paused {
        query_builder
            .push(" AND auto_selection_paused = ")
            .push_bind(paused);
    }

    if data.sort_by.is_empty() {
        query_builder.push(" ORDER BY created_at ASC, id ASC");
    } else {
        query_builder.push(" ORDER BY ");
        let mut separator = query_builder.separated(", ");

        for (column, is_asc) in &data.sort_by {
            let direction = if *is_asc { "ASC" } else { "DESC" };
            separator.push(format!("{} {}", column.column(), direction));
        }
    }

    query_builder
        .build_query_as::<EmailVariant>()
        .fetch_all(pool)
        .await
}

pub async fn list_test_summaries(
    pool: &PgPool,
) -> Result<Vec<TestSummary>, sqlx::Error> {
    sqlx::query_as::<_, TestSummary>(
        r#"
        SELECT
            test_name,
            COUNT(*) AS variant_count,
            bool_and(auto_selection_paused) AS auto_selection_paused
        FROM email_variants
        GROUP BY test_name
        ORDER BY test_name ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Writes every weight in one transaction. A missing variant aborts the
/// whole batch so no partial weight set is ever visible.
pub async fn update_weights(
    pool: &PgPool,
    weights: &[(Uuid, i32)],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for (id, weight) in weights {
        let result = sqlx::query(
            r#"
            UPDATE email_variants
            SET traffic_weight = $1
            WHERE id = $2
            "#,
        )
        .bind(weight)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != 1 {
            tx.rollback().await?;
            return Err(sqlx::Error::RowNotFound);
        }
    }

    tx.commit().await
}

/// Flips the pause flag on every id in one transaction. If any id is gone
/// the whole update is rolled back.
pub async fn set_auto_selection_paused(
    pool: &PgPool,
    ids: &[Uuid],
    paused: bool,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE email_variants
        SET auto_selection_paused = $1
        WHERE id = ANY($2)
        "#,
    )
    .bind(paused)
    .bind(ids)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() != ids.len() as u64 {
        tx.rollback().await?;
        return Err(sqlx::Error::RowNotFound);
    }

    tx.commit().await
}

/// Postgres-backed [`VariantStore`].
#[derive(Clone)]
pub struct PgVariantStore {
    pool: PgPool,
}

impl PgVariantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VariantStore for PgVariantStore {
    async fn list_variants(
        &self,
        test_name: &str,
    ) -> Result<Vec<EmailVariant>, StoreError> {
        Ok(list_variants(&self.pool, &VariantQuery::for_test(test_name)).await?)
    }

    async fn update_weights(
        &self,
        weights: &[(Uuid, i32)],
    ) -> Result<(), StoreError> {
        update_weights(&self.pool, weights).await.map_err(|e| {
            let params: Vec<(String, i32)> = weights
                .iter()
                .map(|(id, w)| (id.to_string(), *w))
                .collect();
            log_err!(self.pool, format!("update_weights: {e}"), params);
            StoreError::Database(e)
        })
    }

    async fn set_auto_selection_paused(
        &self,
        ids: &[Uuid],
        paused: bool,
    ) -> Result<(), StoreError> {
        set_auto_selection_paused(&self.pool, ids, paused)
            .await
            .map_err(|e| {
                log_err!(self.pool, format!("set_auto_selection_paused: {e}"), ids);
                StoreError::Database(e)
            })
    }
}
