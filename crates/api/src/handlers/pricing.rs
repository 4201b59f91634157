//! Handlers for pricing computation, overrides, and history.
//!
//! Override and revert write the pricing row and its history entry as a
//! single atomic unit in the repository layer; recomputation calls the
//! injected upstream signal and clamps the result before persisting.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use courtside_core::error::CoreError;
use courtside_core::paging;
use courtside_core::pricing::{self, EffectivePricing, TierBand};
use courtside_core::pricing_signal::EventMeta;
use courtside_core::types::DbId;
use courtside_db::models::pricing::{EventPricing, OverrideRequest, TierBandRequest};
use courtside_db::repositories::{
    EventPricingRepo, PricingHistoryRepo, PricingTierConfigRepo, SportEventRepo,
};
use courtside_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::events::ensure_event_exists;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireOwner};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A pricing row (absent when nothing has been computed or overridden
/// yet) together with the effective tier/price downstream consumers use.
#[derive(Debug, Serialize)]
pub struct PricingView {
    pub pricing: Option<EventPricing>,
    pub effective: EffectivePricing,
}

impl PricingView {
    fn from_row(pricing: Option<EventPricing>) -> Self {
        let fields = pricing.as_ref().map(EventPricing::fields).unwrap_or_default();
        let effective = pricing::effective_pricing(&fields);
        Self { pricing, effective }
    }
}

// ---------------------------------------------------------------------------
// GET /pricing/{event_id}
// ---------------------------------------------------------------------------

/// Return the pricing row and effective values for an event.
pub async fn get_pricing(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;
    let row = EventPricingRepo::find_by_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse {
        data: PricingView::from_row(row),
    }))
}

// ---------------------------------------------------------------------------
// POST /pricing/{event_id}/override
// ---------------------------------------------------------------------------

/// Apply or clear a manual override.
///
/// An override price must sit inside the band of the tier that will be
/// effective under the override; violations fail with a validation error
/// and write nothing. Clearing the flag behaves exactly like a revert.
pub async fn set_override(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(event_id): Path<DbId>,
    Json(input): Json<OverrideRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;

    if !input.is_manual_override {
        let row = revert(&state.pool, event_id, user.user_id).await?;
        return Ok(Json(DataResponse {
            data: PricingView::from_row(Some(row)),
        }));
    }

    if let Some(tier) = &input.manual_tier {
        pricing::validate_tier(tier)?;
    }
    if let Some(price) = input.manual_price {
        let existing = EventPricingRepo::find_by_event(&state.pool, event_id).await?;
        let tier = input
            .manual_tier
            .clone()
            .or_else(|| existing.as_ref().and_then(|row| row.computed_tier.clone()))
            .unwrap_or_else(|| pricing::DEFAULT_TIER.to_string());
        let band = load_band(&state.pool, &tier).await?;
        pricing::validate_override_price(&tier, price, &band)?;
    }

    let row = EventPricingRepo::set_override(
        &state.pool,
        event_id,
        input.manual_tier.as_deref(),
        input.manual_price,
        true,
        Some(user.user_id),
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        event_id,
        manual_tier = ?input.manual_tier,
        manual_price = ?input.manual_price,
        "Manual pricing override applied"
    );
    Ok(Json(DataResponse {
        data: PricingView::from_row(Some(row)),
    }))
}

// ---------------------------------------------------------------------------
// POST /pricing/{event_id}/revert
// ---------------------------------------------------------------------------

/// Revert an event to computed pricing. Idempotent: reverting a row
/// that is not overridden is a no-op success.
pub async fn revert_to_computed(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_event_exists(&state.pool, event_id).await?;
    let row = revert(&state.pool, event_id, user.user_id).await?;

    tracing::info!(user_id = user.user_id, event_id, "Pricing reverted to computed");
    Ok(Json(DataResponse {
        data: PricingView::from_row(Some(row)),
    }))
}

async fn revert(pool: &DbPool, event_id: DbId, actor_id: DbId) -> Result<EventPricing, AppError> {
    EventPricingRepo::revert_to_computed(pool, event_id, Some(actor_id))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "EventPricing",
                id: event_id,
            })
        })
}

// ---------------------------------------------------------------------------
// POST /pricing/{event_id}/recompute
// ---------------------------------------------------------------------------

/// Recompute an event's tier and price from the upstream signal.
///
/// The suggestion is advisory: its price is clamped to the platform
/// bounds and its tier validated before anything is written. Manual
/// fields are never touched.
pub async fn recompute(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = SportEventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "SportEvent",
                id: event_id,
            })
        })?;

    let meta = EventMeta {
        event_id: event.id,
        title: event.title,
        sport_id: event.sport_id,
        league_id: event.league_id,
        starts_at: event.starts_at,
    };
    let suggested = state.pricing_signal.suggest(&meta).await?;
    pricing::validate_tier(&suggested.tier).map_err(|_| {
        AppError::Core(CoreError::Internal(format!(
            "Pricing signal returned unknown tier '{}'",
            suggested.tier
        )))
    })?;
    let price = pricing::clamp_suggested_price(suggested.price);

    let row =
        EventPricingRepo::apply_computed(&state.pool, event_id, &suggested.tier, price, Some(user.user_id))
            .await?;

    tracing::info!(
        user_id = user.user_id,
        event_id,
        tier = %suggested.tier,
        price = %price,
        "Pricing recomputed"
    );
    Ok(Json(DataResponse {
        data: PricingView::from_row(Some(row)),
    }))
}

// ---------------------------------------------------------------------------
// GET /pricing/history
// ---------------------------------------------------------------------------

/// List recent pricing history across all events, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = paging::clamp_limit(params.limit, 50, 200);
    let items = PricingHistoryRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Tier bands
// ---------------------------------------------------------------------------

/// GET /pricing/tiers
pub async fn list_tier_configs(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<impl IntoResponse> {
    let configs = PricingTierConfigRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: configs }))
}

/// PUT /pricing/tiers/{tier}
///
/// Update a tier's price band. Owner only; `min <= base <= max` is
/// validated before any write.
pub async fn update_tier_config(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    Path(tier): Path<String>,
    Json(input): Json<TierBandRequest>,
) -> AppResult<impl IntoResponse> {
    pricing::validate_tier(&tier)?;
    let band = TierBand {
        min_price: input.min_price,
        base_price: input.base_price,
        max_price: input.max_price,
    };
    pricing::validate_tier_band(&tier, &band)?;

    let config = PricingTierConfigRepo::upsert(&state.pool, &tier, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        tier = %tier,
        min = %input.min_price,
        base = %input.base_price,
        max = %input.max_price,
        "Tier band updated"
    );
    Ok(Json(DataResponse { data: config }))
}

async fn load_band(pool: &DbPool, tier: &str) -> Result<TierBand, AppError> {
    let config = PricingTierConfigRepo::find_by_tier(pool, tier)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "No price band configured for tier '{tier}'"
            )))
        })?;
    Ok(TierBand {
        min_price: config.min_price,
        base_price: config.base_price,
        max_price: config.max_price,
    })
}
