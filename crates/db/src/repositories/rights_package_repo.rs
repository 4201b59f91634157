//! Repository for the `rights_packages` table.

use courtside_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::rights_package::{
    CreateRightsPackage, RightsPackage, SuggestionCandidateRow, UpdateRightsPackage,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, broadcaster_id, name, scope_type, sport_id, league_id, season, \
    start_at, end_at, is_exclusive_default, territories_default, status, created_at, updated_at";

/// Provides CRUD and suggestion-candidate queries for rights packages.
pub struct RightsPackageRepo;

impl RightsPackageRepo {
    /// Insert a new package with `draft` status, returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRightsPackage,
    ) -> Result<RightsPackage, sqlx::Error> {
        let query = format!(
            "INSERT INTO rights_packages
                (broadcaster_id, name, scope_type, sport_id, league_id, season,
                 start_at, end_at, is_exclusive_default, territories_default)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RightsPackage>(&query)
            .bind(input.broadcaster_id)
            .bind(&input.name)
            .bind(&input.scope_type)
            .bind(input.sport_id)
            .bind(input.league_id)
            .bind(&input.season)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(input.is_exclusive_default)
            .bind(&input.territories_default)
            .fetch_one(pool)
            .await
    }

    /// Find a package by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RightsPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rights_packages WHERE id = $1");
        sqlx::query_as::<_, RightsPackage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List packages ordered by start date descending, paginated.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RightsPackage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rights_packages ORDER BY start_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, RightsPackage>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List all packages for one broadcaster, newest window first.
    pub async fn list_by_broadcaster(
        pool: &PgPool,
        broadcaster_id: DbId,
    ) -> Result<Vec<RightsPackage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rights_packages WHERE broadcaster_id = $1 \
             ORDER BY start_at DESC, id DESC"
        );
        sqlx::query_as::<_, RightsPackage>(&query)
            .bind(broadcaster_id)
            .fetch_all(pool)
            .await
    }

    /// Update a package. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRightsPackage,
    ) -> Result<Option<RightsPackage>, sqlx::Error> {
        let query = format!(
            "UPDATE rights_packages SET
                name = COALESCE($2, name),
                season = COALESCE($3, season),
                start_at = COALESCE($4, start_at),
                end_at = COALESCE($5, end_at),
                is_exclusive_default = COALESCE($6, is_exclusive_default),
                territories_default = COALESCE($7, territories_default),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RightsPackage>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.season)
            .bind(input.start_at)
            .bind(input.end_at)
            .bind(input.is_exclusive_default)
            .bind(&input.territories_default)
            .fetch_optional(pool)
            .await
    }

    /// Set a package's status. Transition legality is validated by the
    /// caller against the lifecycle table before this runs.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<RightsPackage>, sqlx::Error> {
        let query = format!(
            "UPDATE rights_packages SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RightsPackage>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Fetch suggestion candidates for an event date: active packages of
    /// active broadcasters whose validity window contains the date.
    ///
    /// Scope matching and ranking happen in `courtside_core::suggestion`;
    /// this query only narrows by status and window.
    pub async fn find_suggestion_candidates(
        pool: &PgPool,
        event_date: Timestamp,
    ) -> Result<Vec<SuggestionCandidateRow>, sqlx::Error> {
        sqlx::query_as::<_, SuggestionCandidateRow>(
            "SELECT
                p.id AS package_id,
                p.name AS package_name,
                b.id AS broadcaster_id,
                b.name AS broadcaster_name,
                p.scope_type,
                p.sport_id,
                p.league_id
             FROM rights_packages p
             JOIN broadcasters b ON b.id = p.broadcaster_id
             WHERE p.status = 'active'
               AND b.status = 'active'
               AND p.start_at <= $1
               AND p.end_at >= $1
             ORDER BY p.name ASC, p.id ASC",
        )
        .bind(event_date)
        .fetch_all(pool)
        .await
    }
}
