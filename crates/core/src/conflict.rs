//! Exclusivity conflict detection.
//!
//! Pure logic over pre-joined grant rows. The repository supplies only
//! active, exclusive grants for the candidate's events (with broadcaster
//! name and event title already joined); this module applies the
//! exclusions and computes allow-list overlaps.

use serde::Serialize;

use crate::rights::EXCLUSIVITY_EXCLUSIVE;
use crate::territory;
use crate::types::DbId;

/// Candidate grant parameters for a conflict check.
#[derive(Debug, Clone)]
pub struct ConflictParams {
    pub event_ids: Vec<DbId>,
    pub territories: Vec<String>,
    pub exclusivity: String,
    /// Broadcaster being assigned -- its own grants never self-conflict.
    pub exclude_broadcaster_id: Option<DbId>,
    /// Grant being edited -- excluded so edits don't conflict with themselves.
    pub exclude_right_id: Option<DbId>,
}

/// An active exclusive grant row, joined with broadcaster and event names.
#[derive(Debug, Clone)]
pub struct GrantCoverage {
    pub right_id: DbId,
    pub event_id: DbId,
    pub event_title: String,
    pub broadcaster_id: DbId,
    pub broadcaster_name: String,
    pub territories_allowed: Vec<String>,
}

/// A detected exclusivity overlap. Advisory data, never a blocking error:
/// the caller decides whether to proceed with the candidate mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    pub right_id: DbId,
    pub event_id: DbId,
    pub event_title: String,
    pub broadcaster_id: DbId,
    pub broadcaster_name: String,
    pub territories: Vec<String>,
}

/// True when a candidate with these parameters can conflict at all.
///
/// Shared and non-exclusive candidates cannot produce exclusivity
/// conflicts by definition, and empty event or territory lists make the
/// check vacuous -- callers use this to skip the storage query entirely.
pub fn can_conflict(params: &ConflictParams) -> bool {
    params.exclusivity == EXCLUSIVITY_EXCLUSIVE
        && !params.event_ids.is_empty()
        && !params.territories.is_empty()
}

/// Find territory overlaps between the candidate and existing grants.
///
/// Overlap is computed on allow-lists only: a blocked territory narrows
/// its own grant's coverage but does not resolve another grant's
/// exclusivity claim for that code. Overlap territories are sorted so
/// results are deterministic.
pub fn find_conflicts(params: &ConflictParams, grants: &[GrantCoverage]) -> Vec<Conflict> {
    if !can_conflict(params) {
        return Vec::new();
    }

    let mut conflicts = Vec::new();
    for grant in grants {
        if params.exclude_broadcaster_id == Some(grant.broadcaster_id) {
            continue;
        }
        if params.exclude_right_id == Some(grant.right_id) {
            continue;
        }
        if !params.event_ids.contains(&grant.event_id) {
            continue;
        }

        let overlap = territory::overlap(&params.territories, &grant.territories_allowed);
        if !overlap.is_empty() {
            conflicts.push(Conflict {
                right_id: grant.right_id,
                event_id: grant.event_id,
                event_title: grant.event_title.clone(),
                broadcaster_id: grant.broadcaster_id,
                broadcaster_name: grant.broadcaster_name.clone(),
                territories: overlap,
            });
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rights::{EXCLUSIVITY_NON_EXCLUSIVE, EXCLUSIVITY_SHARED};

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn grant(
        right_id: DbId,
        event_id: DbId,
        broadcaster_id: DbId,
        territories: &[&str],
    ) -> GrantCoverage {
        GrantCoverage {
            right_id,
            event_id,
            event_title: format!("Event {event_id}"),
            broadcaster_id,
            broadcaster_name: format!("Broadcaster {broadcaster_id}"),
            territories_allowed: codes(territories),
        }
    }

    fn exclusive_params(event_ids: &[DbId], territories: &[&str]) -> ConflictParams {
        ConflictParams {
            event_ids: event_ids.to_vec(),
            territories: codes(territories),
            exclusivity: EXCLUSIVITY_EXCLUSIVE.to_string(),
            exclude_broadcaster_id: None,
            exclude_right_id: None,
        }
    }

    #[test]
    fn detects_overlap_on_shared_territory() {
        // B1 holds {FR, BE} exclusively; candidate claims {BE, DE}.
        let grants = vec![grant(10, 1, 100, &["FR", "BE"])];
        let params = exclusive_params(&[1], &["BE", "DE"]);

        let conflicts = find_conflicts(&params, &grants);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].broadcaster_id, 100);
        assert_eq!(conflicts[0].territories, codes(&["BE"]));
    }

    #[test]
    fn overlap_is_symmetric() {
        // Swapping candidate and holder reports the same territory.
        let grants = vec![grant(11, 1, 200, &["BE", "DE"])];
        let params = exclusive_params(&[1], &["FR", "BE"]);

        let conflicts = find_conflicts(&params, &grants);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].territories, codes(&["BE"]));
    }

    #[test]
    fn shared_candidate_never_conflicts() {
        let grants = vec![grant(10, 1, 100, &["FR", "BE"])];
        let mut params = exclusive_params(&[1], &["FR"]);
        params.exclusivity = EXCLUSIVITY_SHARED.to_string();

        assert!(find_conflicts(&params, &grants).is_empty());
    }

    #[test]
    fn non_exclusive_candidate_never_conflicts() {
        let grants = vec![grant(10, 1, 100, &["FR", "BE"])];
        let mut params = exclusive_params(&[1], &["FR"]);
        params.exclusivity = EXCLUSIVITY_NON_EXCLUSIVE.to_string();

        assert!(find_conflicts(&params, &grants).is_empty());
    }

    #[test]
    fn empty_inputs_short_circuit() {
        let grants = vec![grant(10, 1, 100, &["FR"])];
        assert!(find_conflicts(&exclusive_params(&[], &["FR"]), &grants).is_empty());
        assert!(find_conflicts(&exclusive_params(&[1], &[]), &grants).is_empty());
        assert!(!can_conflict(&exclusive_params(&[], &["FR"])));
        assert!(!can_conflict(&exclusive_params(&[1], &[])));
    }

    #[test]
    fn excluded_broadcaster_does_not_self_conflict() {
        let grants = vec![grant(10, 1, 100, &["FR"])];
        let mut params = exclusive_params(&[1], &["FR"]);
        params.exclude_broadcaster_id = Some(100);

        assert!(find_conflicts(&params, &grants).is_empty());
    }

    #[test]
    fn excluded_right_does_not_self_conflict() {
        let grants = vec![grant(10, 1, 100, &["FR"])];
        let mut params = exclusive_params(&[1], &["FR"]);
        params.exclude_right_id = Some(10);

        assert!(find_conflicts(&params, &grants).is_empty());
    }

    #[test]
    fn exclusions_leave_other_grants_in_play() {
        let grants = vec![
            grant(10, 1, 100, &["FR"]),
            grant(11, 1, 200, &["FR"]),
        ];
        let mut params = exclusive_params(&[1], &["FR"]);
        params.exclude_broadcaster_id = Some(100);

        let conflicts = find_conflicts(&params, &grants);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].right_id, 11);
    }

    #[test]
    fn disjoint_territories_do_not_conflict() {
        let grants = vec![grant(10, 1, 100, &["US", "CA"])];
        let params = exclusive_params(&[1], &["FR", "BE"]);

        assert!(find_conflicts(&params, &grants).is_empty());
    }

    #[test]
    fn reports_one_conflict_per_grant_across_events() {
        let grants = vec![
            grant(10, 1, 100, &["FR"]),
            grant(20, 2, 100, &["FR", "BE"]),
        ];
        let params = exclusive_params(&[1, 2], &["FR", "BE"]);

        let conflicts = find_conflicts(&params, &grants);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].event_id, 1);
        assert_eq!(conflicts[0].territories, codes(&["FR"]));
        assert_eq!(conflicts[1].event_id, 2);
        assert_eq!(conflicts[1].territories, codes(&["BE", "FR"]));
    }

    #[test]
    fn grants_outside_candidate_events_are_ignored() {
        let grants = vec![grant(10, 9, 100, &["FR"])];
        let params = exclusive_params(&[1], &["FR"]);

        assert!(find_conflicts(&params, &grants).is_empty());
    }
}
