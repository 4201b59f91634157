//! Integration tests for the pricing override/recompute lifecycle.
//!
//! Exercises the repository layer against a real database:
//! - upsert-by-event semantics
//! - atomic history append on every mutation
//! - override -> revert round trip
//! - idempotent revert
//! - append-only history (entry counts only ever grow)

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use courtside_core::pricing::{
    self, CHANGE_AUTOMATIC, CHANGE_INITIAL, CHANGE_MANUAL, TIER_BRONZE, TIER_GOLD, TIER_SILVER,
};
use courtside_db::models::sport_event::CreateSportEvent;
use courtside_db::repositories::{EventPricingRepo, PricingHistoryRepo, SportEventRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dec(units: i64) -> Decimal {
    Decimal::new(units, 2)
}

async fn seed_event(pool: &PgPool, title: &str) -> i64 {
    let event = SportEventRepo::create(
        pool,
        &CreateSportEvent {
            title: title.to_string(),
            sport_id: 3,
            league_id: Some(7),
            starts_at: Utc::now(),
        },
    )
    .await
    .expect("create event");
    event.id
}

// ---------------------------------------------------------------------------
// Recompute
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn first_recompute_creates_row_with_initial_history(pool: PgPool) {
    let event_id = seed_event(&pool, "Opening Match").await;

    let row = EventPricingRepo::apply_computed(&pool, event_id, TIER_GOLD, dec(300), Some(1))
        .await
        .expect("apply computed");

    assert_eq!(row.computed_tier.as_deref(), Some(TIER_GOLD));
    assert_eq!(row.computed_price, Some(dec(300)));
    assert!(!row.is_manual_override);

    let history = PricingHistoryRepo::list_for_pricing(&pool, row.id)
        .await
        .expect("list history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].change_type, CHANGE_INITIAL);
    assert_eq!(history[0].previous_tier, None);
    assert_eq!(history[0].new_tier.as_deref(), Some(TIER_GOLD));
}

#[sqlx::test(migrations = "./migrations")]
async fn changed_recompute_appends_automatic_history(pool: PgPool) {
    let event_id = seed_event(&pool, "Derby").await;

    let row = EventPricingRepo::apply_computed(&pool, event_id, TIER_SILVER, dec(200), None)
        .await
        .unwrap();
    EventPricingRepo::apply_computed(&pool, event_id, TIER_GOLD, dec(350), None)
        .await
        .unwrap();

    let history = PricingHistoryRepo::list_for_pricing(&pool, row.id).await.unwrap();
    assert_eq!(history.len(), 2);
    // Newest first.
    assert_eq!(history[0].change_type, CHANGE_AUTOMATIC);
    assert_eq!(history[0].previous_tier.as_deref(), Some(TIER_SILVER));
    assert_eq!(history[0].previous_price, Some(dec(200)));
    assert_eq!(history[0].new_price, Some(dec(350)));
}

#[sqlx::test(migrations = "./migrations")]
async fn unchanged_recompute_writes_nothing(pool: PgPool) {
    let event_id = seed_event(&pool, "Quiet Fixture").await;

    let row = EventPricingRepo::apply_computed(&pool, event_id, TIER_SILVER, dec(200), None)
        .await
        .unwrap();
    let again = EventPricingRepo::apply_computed(&pool, event_id, TIER_SILVER, dec(200), None)
        .await
        .unwrap();

    assert_eq!(again.id, row.id);
    let count = PricingHistoryRepo::count_for_pricing(&pool, row.id).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn recompute_leaves_manual_fields_untouched(pool: PgPool) {
    let event_id = seed_event(&pool, "Final").await;

    EventPricingRepo::set_override(&pool, event_id, Some(TIER_GOLD), Some(dec(350)), true, Some(9))
        .await
        .unwrap();
    let row = EventPricingRepo::apply_computed(&pool, event_id, TIER_BRONZE, dec(120), None)
        .await
        .unwrap();

    assert_eq!(row.manual_tier.as_deref(), Some(TIER_GOLD));
    assert_eq!(row.manual_price, Some(dec(350)));
    assert!(row.is_manual_override);
    assert_eq!(row.computed_tier.as_deref(), Some(TIER_BRONZE));
}

// ---------------------------------------------------------------------------
// Override / revert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn override_upserts_single_row_per_event(pool: PgPool) {
    let event_id = seed_event(&pool, "Group Stage").await;

    let first = EventPricingRepo::set_override(
        &pool, event_id, Some(TIER_GOLD), Some(dec(300)), true, Some(1),
    )
    .await
    .unwrap();
    let second = EventPricingRepo::set_override(
        &pool, event_id, Some(TIER_SILVER), Some(dec(250)), true, Some(1),
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM event_pricing WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn override_then_revert_restores_computed_values(pool: PgPool) {
    let event_id = seed_event(&pool, "Semi Final").await;

    let row = EventPricingRepo::apply_computed(&pool, event_id, TIER_SILVER, dec(200), None)
        .await
        .unwrap();
    let before = pricing::effective_pricing(&row.fields());

    EventPricingRepo::set_override(&pool, event_id, Some(TIER_GOLD), Some(dec(350)), true, Some(4))
        .await
        .unwrap();
    let reverted = EventPricingRepo::revert_to_computed(&pool, event_id, Some(4))
        .await
        .unwrap()
        .expect("pricing row exists");

    let after = pricing::effective_pricing(&reverted.fields());
    assert_eq!(after, before);
    assert!(!reverted.is_manual_override);
    assert_eq!(reverted.manual_tier, None);
    assert_eq!(reverted.manual_price, None);

    // Exactly two new entries on top of the initial one: manual, then automatic.
    let history = PricingHistoryRepo::list_for_pricing(&pool, row.id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].change_type, CHANGE_AUTOMATIC);
    assert_eq!(history[1].change_type, CHANGE_MANUAL);
    assert_eq!(history[2].change_type, CHANGE_INITIAL);

    // The manual entry captured the pre-override effective values.
    assert_eq!(history[1].previous_tier.as_deref(), Some(TIER_SILVER));
    assert_eq!(history[1].previous_price, Some(dec(200)));
    assert_eq!(history[1].new_tier.as_deref(), Some(TIER_GOLD));
    assert_eq!(history[1].new_price, Some(dec(350)));
}

#[sqlx::test(migrations = "./migrations")]
async fn revert_without_override_is_idempotent_noop(pool: PgPool) {
    let event_id = seed_event(&pool, "Friendly").await;

    let row = EventPricingRepo::apply_computed(&pool, event_id, TIER_BRONZE, dec(120), None)
        .await
        .unwrap();
    let reverted = EventPricingRepo::revert_to_computed(&pool, event_id, Some(2))
        .await
        .unwrap()
        .expect("pricing row exists");

    assert!(!reverted.is_manual_override);
    let count = PricingHistoryRepo::count_for_pricing(&pool, row.id).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn revert_on_missing_row_returns_none(pool: PgPool) {
    let event_id = seed_event(&pool, "Unpriced").await;

    let result = EventPricingRepo::revert_to_computed(&pool, event_id, None).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn override_records_actor(pool: PgPool) {
    let event_id = seed_event(&pool, "Night Game").await;

    let row = EventPricingRepo::set_override(
        &pool, event_id, Some(TIER_GOLD), Some(dec(300)), true, Some(42),
    )
    .await
    .unwrap();

    let history = PricingHistoryRepo::list_for_pricing(&pool, row.id).await.unwrap();
    assert_eq!(history[0].changed_by, Some(42));
}

#[sqlx::test(migrations = "./migrations")]
async fn history_listing_joins_event_titles(pool: PgPool) {
    let event_id = seed_event(&pool, "Cup Final").await;
    EventPricingRepo::apply_computed(&pool, event_id, TIER_GOLD, dec(400), None)
        .await
        .unwrap();

    let items = PricingHistoryRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].event_title, "Cup Final");
    assert_eq!(items[0].event_id, event_id);
}
