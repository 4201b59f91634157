//! Rights domain constants and status lifecycles.
//!
//! Exclusivity, platform, scope, and status values are stored as TEXT
//! columns (constrained by CHECKs in the migrations) and validated here
//! against well-known constants at the mutation boundary. Status
//! lifecycles are explicit transition tables rather than ad-hoc checks
//! scattered through handlers.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Exclusivity
// ---------------------------------------------------------------------------

pub const EXCLUSIVITY_EXCLUSIVE: &str = "exclusive";
pub const EXCLUSIVITY_SHARED: &str = "shared";
pub const EXCLUSIVITY_NON_EXCLUSIVE: &str = "non_exclusive";

/// Validate an exclusivity value.
pub fn validate_exclusivity(value: &str) -> Result<(), CoreError> {
    match value {
        EXCLUSIVITY_EXCLUSIVE | EXCLUSIVITY_SHARED | EXCLUSIVITY_NON_EXCLUSIVE => Ok(()),
        other => Err(CoreError::Validation(format!(
            "Unknown exclusivity '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

pub const PLATFORM_OTT: &str = "ott";
pub const PLATFORM_LINEAR: &str = "linear";
pub const PLATFORM_BOTH: &str = "both";

/// Validate a distribution platform value.
pub fn validate_platform(value: &str) -> Result<(), CoreError> {
    match value {
        PLATFORM_OTT | PLATFORM_LINEAR | PLATFORM_BOTH => Ok(()),
        other => Err(CoreError::Validation(format!("Unknown platform '{other}'"))),
    }
}

// ---------------------------------------------------------------------------
// Package scope
// ---------------------------------------------------------------------------

pub const SCOPE_SPORT: &str = "sport";
pub const SCOPE_COMPETITION: &str = "competition";
pub const SCOPE_SEASON: &str = "season";

/// Validate a rights package scope type.
pub fn validate_scope_type(value: &str) -> Result<(), CoreError> {
    match value {
        SCOPE_SPORT | SCOPE_COMPETITION | SCOPE_SEASON => Ok(()),
        other => Err(CoreError::Validation(format!(
            "Unknown scope type '{other}'"
        ))),
    }
}

/// Validate that a package's scope type has its matching id field:
/// sport-scoped packages need a sport, competition- and season-scoped
/// packages need a league.
pub fn validate_package_scope(
    scope_type: &str,
    sport_id: Option<DbId>,
    league_id: Option<DbId>,
) -> Result<(), CoreError> {
    validate_scope_type(scope_type)?;
    match scope_type {
        SCOPE_SPORT if sport_id.is_none() => Err(CoreError::Validation(
            "A sport-scoped package requires sport_id".to_string(),
        )),
        SCOPE_COMPETITION | SCOPE_SEASON if league_id.is_none() => Err(CoreError::Validation(
            format!("A {scope_type}-scoped package requires league_id"),
        )),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Broadcaster lifecycle
// ---------------------------------------------------------------------------

pub const BROADCASTER_ACTIVE: &str = "active";
pub const BROADCASTER_SUSPENDED: &str = "suspended";
pub const BROADCASTER_PENDING: &str = "pending";

/// Allowed broadcaster status transitions.
///
/// Broadcaster status is independent of rights: suspension leaves existing
/// grants in place, it only removes the broadcaster from suggestions.
pub fn broadcaster_status_can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (BROADCASTER_PENDING, BROADCASTER_ACTIVE)
            | (BROADCASTER_ACTIVE, BROADCASTER_SUSPENDED)
            | (BROADCASTER_SUSPENDED, BROADCASTER_ACTIVE)
    )
}

/// Check a broadcaster transition, rejecting with `Conflict` when illegal.
pub fn ensure_broadcaster_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if !broadcaster_status_can_transition(from, to) {
        return Err(CoreError::Conflict(format!(
            "Invalid broadcaster status transition from '{from}' to '{to}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Package lifecycle
// ---------------------------------------------------------------------------

pub const PACKAGE_DRAFT: &str = "draft";
pub const PACKAGE_ACTIVE: &str = "active";
pub const PACKAGE_EXPIRED: &str = "expired";

/// Allowed package status transitions: draft -> active -> expired.
pub fn package_status_can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (PACKAGE_DRAFT, PACKAGE_ACTIVE) | (PACKAGE_ACTIVE, PACKAGE_EXPIRED)
    )
}

/// Check a package transition, rejecting with `Conflict` when illegal.
pub fn ensure_package_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if !package_status_can_transition(from, to) {
        return Err(CoreError::Conflict(format!(
            "Invalid package status transition from '{from}' to '{to}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Grant lifecycle
// ---------------------------------------------------------------------------

pub const GRANT_DRAFT: &str = "draft";
pub const GRANT_ACTIVE: &str = "active";
pub const GRANT_EXPIRED: &str = "expired";
pub const GRANT_REVOKED: &str = "revoked";

/// Allowed grant status transitions: draft -> active -> expired | revoked.
///
/// Revocation implies a grant that was live, so draft -> revoked is
/// rejected (drafts are deleted instead). Expired and revoked are
/// terminal.
pub fn grant_status_can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (GRANT_DRAFT, GRANT_ACTIVE)
            | (GRANT_ACTIVE, GRANT_EXPIRED)
            | (GRANT_ACTIVE, GRANT_REVOKED)
    )
}

/// Check a grant transition, rejecting with `Conflict` when illegal.
pub fn ensure_grant_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if !grant_status_can_transition(from, to) {
        return Err(CoreError::Conflict(format!(
            "Invalid grant status transition from '{from}' to '{to}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
