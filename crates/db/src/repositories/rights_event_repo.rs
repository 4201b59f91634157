//! Repository for the `rights_events` table.

use courtside_core::types::DbId;
use sqlx::PgPool;

use crate::models::rights_event::{
    CreateRightsEvent, ExclusiveGrantRow, RightsEvent, UpdateRightsEvent,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, broadcaster_id, package_id, rights_live, rights_replay, \
    rights_highlights, replay_window_hours, territories_allowed, territories_blocked, \
    exclusivity, platform, status, expires_at, created_at, updated_at";

/// Provides CRUD and conflict-scan queries for rights grants.
pub struct RightsEventRepo;

impl RightsEventRepo {
    /// Insert a new grant with `draft` status, returning the row.
    ///
    /// Territory lists are normalized by the caller before this runs.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRightsEvent,
        platform: &str,
    ) -> Result<RightsEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO rights_events
                (event_id, broadcaster_id, package_id, rights_live, rights_replay,
                 rights_highlights, replay_window_hours, territories_allowed,
                 territories_blocked, exclusivity, platform, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RightsEvent>(&query)
            .bind(input.event_id)
            .bind(input.broadcaster_id)
            .bind(input.package_id)
            .bind(input.rights_live)
            .bind(input.rights_replay)
            .bind(input.rights_highlights)
            .bind(input.replay_window_hours)
            .bind(&input.territories_allowed)
            .bind(&input.territories_blocked)
            .bind(&input.exclusivity)
            .bind(platform)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a grant by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RightsEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rights_events WHERE id = $1");
        sqlx::query_as::<_, RightsEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all grants for an event, newest first. Revoked and expired
    /// grants are included: assignment history stays queryable.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<RightsEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rights_events WHERE event_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RightsEvent>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Update a grant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Lifecycle
    /// checks (no edits to terminal grants) happen in the handler.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRightsEvent,
    ) -> Result<Option<RightsEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE rights_events SET
                rights_live = COALESCE($2, rights_live),
                rights_replay = COALESCE($3, rights_replay),
                rights_highlights = COALESCE($4, rights_highlights),
                replay_window_hours = COALESCE($5, replay_window_hours),
                territories_allowed = COALESCE($6, territories_allowed),
                territories_blocked = COALESCE($7, territories_blocked),
                exclusivity = COALESCE($8, exclusivity),
                platform = COALESCE($9, platform),
                expires_at = COALESCE($10, expires_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RightsEvent>(&query)
            .bind(id)
            .bind(input.rights_live)
            .bind(input.rights_replay)
            .bind(input.rights_highlights)
            .bind(input.replay_window_hours)
            .bind(&input.territories_allowed)
            .bind(&input.territories_blocked)
            .bind(&input.exclusivity)
            .bind(&input.platform)
            .bind(input.expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Set a grant's status. Transition legality is validated by the
    /// caller against the lifecycle table before this runs.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<RightsEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE rights_events SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RightsEvent>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a draft grant. Returns `true` if a row was removed.
    ///
    /// Only drafts may be deleted; active grants are revoked instead.
    pub async fn delete_draft(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM rights_events WHERE id = $1 AND status = 'draft'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch active exclusive grants for the given events, joined with
    /// broadcaster and event names, for conflict detection.
    ///
    /// Self-exclusions are applied here as well as in the pure detector:
    /// the SQL keeps the scan small, the detector keeps the rule testable.
    pub async fn find_active_exclusive_for_events(
        pool: &PgPool,
        event_ids: &[DbId],
        exclude_broadcaster_id: Option<DbId>,
        exclude_right_id: Option<DbId>,
    ) -> Result<Vec<ExclusiveGrantRow>, sqlx::Error> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, ExclusiveGrantRow>(
            "SELECT
                r.id AS right_id,
                r.event_id,
                e.title AS event_title,
                r.broadcaster_id,
                b.name AS broadcaster_name,
                r.territories_allowed
             FROM rights_events r
             JOIN sport_events e ON e.id = r.event_id
             JOIN broadcasters b ON b.id = r.broadcaster_id
             WHERE r.event_id = ANY($1)
               AND r.status = 'active'
               AND r.exclusivity = 'exclusive'
               AND ($2::BIGINT IS NULL OR r.broadcaster_id <> $2)
               AND ($3::BIGINT IS NULL OR r.id <> $3)
             ORDER BY r.event_id ASC, r.id ASC",
        )
        .bind(event_ids)
        .bind(exclude_broadcaster_id)
        .bind(exclude_right_id)
        .fetch_all(pool)
        .await
    }
}
