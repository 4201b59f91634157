//! HTTP-level integration tests for the pricing endpoints.
//!
//! The test app uses the fixed pricing signal (bronze at the platform
//! floor), so recompute results are deterministic.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, editor_token, get, owner_token, post_empty,
    post_json, put_json, seed_event,
};
use sqlx::PgPool;

/// Collect the change types recorded for one event, newest first.
async fn change_types_for_event(pool: &PgPool, event_id: i64) -> Vec<String> {
    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/pricing/history?limit=100",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["event_id"].as_i64() == Some(event_id))
        .map(|item| item["change_type"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Recompute
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn recompute_writes_computed_values(pool: PgPool) {
    let event_id = seed_event(&pool, "Opening Match").await;

    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}/recompute"),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["pricing"]["computed_tier"], "bronze");
    assert_eq!(json["data"]["effective"]["tier"], "bronze");
    assert_eq!(json["data"]["effective"]["price"], "0.99");

    assert_eq!(change_types_for_event(&pool, event_id).await, vec!["initial"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unchanged_recompute_appends_no_history(pool: PgPool) {
    let event_id = seed_event(&pool, "Quiet Fixture").await;

    for _ in 0..2 {
        let response = post_empty(
            build_test_app(pool.clone()),
            &format!("/api/v1/pricing/{event_id}/recompute"),
            &admin_token(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(change_types_for_event(&pool, event_id).await, vec!["initial"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn recompute_unknown_event_is_not_found(pool: PgPool) {
    let response = post_empty(
        build_test_app(pool),
        "/api/v1/pricing/999999/recompute",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Override / revert round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn override_then_revert_restores_computed_values(pool: PgPool) {
    let event_id = seed_event(&pool, "Final").await;

    post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}/recompute"),
        &admin_token(),
    )
    .await;

    // Override to gold at 3.50 (inside the seeded 2.00..4.00 band).
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}/override"),
        &admin_token(),
        serde_json::json!({
            "is_manual_override": true,
            "manual_tier": "gold",
            "manual_price": "3.50",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["effective"]["tier"], "gold");
    assert_eq!(json["data"]["effective"]["price"], "3.50");

    // Revert: effective pricing returns to the computed values.
    let response = post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}/revert"),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pricing"]["is_manual_override"], false);
    assert_eq!(json["data"]["pricing"]["manual_tier"], serde_json::Value::Null);
    assert_eq!(json["data"]["effective"]["tier"], "bronze");
    assert_eq!(json["data"]["effective"]["price"], "0.99");

    // Exactly two new entries on top of the initial one: manual, then automatic.
    assert_eq!(
        change_types_for_event(&pool, event_id).await,
        vec!["automatic", "manual", "initial"]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revert_is_idempotent(pool: PgPool) {
    let event_id = seed_event(&pool, "Derby").await;

    post_empty(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}/recompute"),
        &admin_token(),
    )
    .await;

    for _ in 0..2 {
        let response = post_empty(
            build_test_app(pool.clone()),
            &format!("/api/v1/pricing/{event_id}/revert"),
            &admin_token(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(change_types_for_event(&pool, event_id).await, vec!["initial"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revert_without_pricing_row_is_not_found(pool: PgPool) {
    let event_id = seed_event(&pool, "Unpriced").await;

    let response = post_empty(
        build_test_app(pool),
        &format!("/api/v1/pricing/{event_id}/revert"),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Band validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn override_above_band_fails_and_writes_nothing(pool: PgPool) {
    let event_id = seed_event(&pool, "E1").await;

    // Seeded gold band is 2.00..4.00; 5.00 must fail validation.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}/override"),
        &admin_token(),
        serde_json::json!({
            "is_manual_override": true,
            "manual_tier": "gold",
            "manual_price": "5.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No pricing row and no history were written.
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/pricing/{event_id}"),
        &admin_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["pricing"], serde_json::Value::Null);
    assert!(change_types_for_event(&pool, event_id).await.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn override_below_band_fails(pool: PgPool) {
    let event_id = seed_event(&pool, "E1").await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/pricing/{event_id}/override"),
        &admin_token(),
        serde_json::json!({
            "is_manual_override": true,
            "manual_tier": "gold",
            "manual_price": "1.99",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn override_with_unknown_tier_fails(pool: PgPool) {
    let event_id = seed_event(&pool, "E1").await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/pricing/{event_id}/override"),
        &admin_token(),
        serde_json::json!({
            "is_manual_override": true,
            "manual_tier": "platinum",
            "manual_price": "3.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Tier band configuration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn tier_bands_are_owner_only(pool: PgPool) {
    let body = serde_json::json!({
        "min_price": "2.50",
        "base_price": "3.50",
        "max_price": "4.50",
    });

    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/pricing/tiers/gold",
        &admin_token(),
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json(
        build_test_app(pool),
        "/api/v1/pricing/tiers/gold",
        &owner_token(),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["min_price"], "2.50");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unordered_tier_band_is_rejected(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/api/v1/pricing/tiers/gold",
        &owner_token(),
        serde_json::json!({
            "min_price": "4.00",
            "base_price": "3.00",
            "max_price": "5.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// AuthZ
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn editors_cannot_override_pricing(pool: PgPool) {
    let event_id = seed_event(&pool, "E1").await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/pricing/{event_id}/override"),
        &editor_token(),
        serde_json::json!({
            "is_manual_override": true,
            "manual_tier": "gold",
            "manual_price": "3.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editors_can_read_history(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        "/api/v1/pricing/history",
        &editor_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
