//! Repository for the `territories` reference table.

use sqlx::PgPool;

use crate::models::territory::Territory;

/// Read-only accessor for territory reference data.
pub struct TerritoryRepo;

impl TerritoryRepo {
    /// List all territories, grouped by region then code.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Territory>, sqlx::Error> {
        sqlx::query_as::<_, Territory>(
            "SELECT code, region, created_at FROM territories ORDER BY region ASC, code ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Check which of the given codes are missing from the catalog.
    ///
    /// Used to reject grants referencing unknown territories.
    pub async fn find_missing(
        pool: &PgPool,
        codes: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT candidate FROM UNNEST($1::text[]) AS candidate
             WHERE candidate NOT IN (SELECT code FROM territories)",
        )
        .bind(codes)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
