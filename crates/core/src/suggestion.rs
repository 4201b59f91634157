//! Broadcaster suggestion ranking for rights assignment.
//!
//! Candidates are active packages of active broadcasters whose validity
//! window contains the event date (both filters applied in SQL by the
//! repository). This module applies scope matching, priority ranking,
//! deterministic ordering, and first-match-wins de-duplication.

use std::collections::HashSet;

use serde::Serialize;

use crate::rights::{SCOPE_COMPETITION, SCOPE_SEASON, SCOPE_SPORT};
use crate::types::DbId;

/// Priority values: lower is more specific and ranks first.
pub const PRIORITY_SEASON: i32 = 1;
pub const PRIORITY_COMPETITION: i32 = 2;
pub const PRIORITY_SPORT: i32 = 3;

/// A candidate package row for suggestion ranking.
#[derive(Debug, Clone)]
pub struct PackageCandidate {
    pub package_id: DbId,
    pub package_name: String,
    pub broadcaster_id: DbId,
    pub broadcaster_name: String,
    pub scope_type: String,
    pub sport_id: Option<DbId>,
    pub league_id: Option<DbId>,
}

/// A ranked broadcaster suggestion. `match_type` names the scope that
/// matched; a broadcaster appears at most once, via its best match.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub broadcaster_id: DbId,
    pub broadcaster_name: String,
    pub package_id: DbId,
    pub package_name: String,
    pub match_type: String,
    pub priority: i32,
}

/// Scope matching: season and competition packages match on league,
/// sport packages match on sport. Returns the priority and match type,
/// or `None` when the package does not apply to this event.
fn match_scope(
    candidate: &PackageCandidate,
    sport_id: Option<DbId>,
    league_id: Option<DbId>,
) -> Option<(i32, &'static str)> {
    let league_matches = league_id.is_some() && candidate.league_id == league_id;
    let sport_matches = sport_id.is_some() && candidate.sport_id == sport_id;

    match candidate.scope_type.as_str() {
        SCOPE_SEASON if league_matches => Some((PRIORITY_SEASON, SCOPE_SEASON)),
        SCOPE_COMPETITION if league_matches => Some((PRIORITY_COMPETITION, SCOPE_COMPETITION)),
        SCOPE_SPORT if sport_matches => Some((PRIORITY_SPORT, SCOPE_SPORT)),
        _ => None,
    }
}

/// Rank candidate packages into broadcaster suggestions.
///
/// Ordering is ascending priority with ties broken by package name, so
/// results are stable and deterministic. Once a broadcaster is suggested
/// through one package it never reappears through a lower-priority scope.
pub fn suggest_broadcasters(
    sport_id: Option<DbId>,
    league_id: Option<DbId>,
    candidates: &[PackageCandidate],
) -> Vec<Suggestion> {
    let mut matched: Vec<Suggestion> = candidates
        .iter()
        .filter_map(|candidate| {
            match_scope(candidate, sport_id, league_id).map(|(priority, match_type)| Suggestion {
                broadcaster_id: candidate.broadcaster_id,
                broadcaster_name: candidate.broadcaster_name.clone(),
                package_id: candidate.package_id,
                package_name: candidate.package_name.clone(),
                match_type: match_type.to_string(),
                priority,
            })
        })
        .collect();

    matched.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.package_name.cmp(&b.package_name))
    });

    let mut seen = HashSet::new();
    matched.retain(|suggestion| seen.insert(suggestion.broadcaster_id));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        package_id: DbId,
        package_name: &str,
        broadcaster_id: DbId,
        scope_type: &str,
        sport_id: Option<DbId>,
        league_id: Option<DbId>,
    ) -> PackageCandidate {
        PackageCandidate {
            package_id,
            package_name: package_name.to_string(),
            broadcaster_id,
            broadcaster_name: format!("Broadcaster {broadcaster_id}"),
            scope_type: scope_type.to_string(),
            sport_id,
            league_id,
        }
    }

    #[test]
    fn season_package_matches_on_league() {
        let candidates = vec![candidate(1, "Season 26/27", 100, SCOPE_SEASON, None, Some(7))];
        let suggestions = suggest_broadcasters(None, Some(7), &candidates);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].match_type, SCOPE_SEASON);
        assert_eq!(suggestions[0].priority, PRIORITY_SEASON);
    }

    #[test]
    fn competition_package_matches_on_league() {
        let candidates = vec![candidate(1, "Cup", 100, SCOPE_COMPETITION, None, Some(7))];
        let suggestions = suggest_broadcasters(None, Some(7), &candidates);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, PRIORITY_COMPETITION);
    }

    #[test]
    fn sport_package_matches_on_sport() {
        let candidates = vec![candidate(1, "All Football", 100, SCOPE_SPORT, Some(3), None)];
        let suggestions = suggest_broadcasters(Some(3), None, &candidates);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].match_type, SCOPE_SPORT);
    }

    #[test]
    fn mismatched_ids_produce_nothing() {
        let candidates = vec![
            candidate(1, "Other League", 100, SCOPE_COMPETITION, None, Some(8)),
            candidate(2, "Other Sport", 200, SCOPE_SPORT, Some(4), None),
        ];
        assert!(suggest_broadcasters(Some(3), Some(7), &candidates).is_empty());
    }

    #[test]
    fn absent_event_ids_match_nothing() {
        // An event with no league can't match league-scoped packages, even
        // ones whose own league_id is also NULL.
        let candidates = vec![candidate(1, "Null League", 100, SCOPE_SEASON, None, None)];
        assert!(suggest_broadcasters(Some(3), None, &candidates).is_empty());
    }

    #[test]
    fn broadcaster_deduplicated_to_best_match() {
        // Same broadcaster matches through season and sport: only the
        // season suggestion survives.
        let candidates = vec![
            candidate(1, "All Football", 100, SCOPE_SPORT, Some(3), None),
            candidate(2, "Season 26/27", 100, SCOPE_SEASON, None, Some(7)),
        ];
        let suggestions = suggest_broadcasters(Some(3), Some(7), &candidates);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].match_type, SCOPE_SEASON);
        assert_eq!(suggestions[0].package_id, 2);
    }

    #[test]
    fn ordering_is_priority_then_package_name() {
        let candidates = vec![
            candidate(1, "Zebra Sport", 100, SCOPE_SPORT, Some(3), None),
            candidate(2, "Alpha Cup", 200, SCOPE_COMPETITION, None, Some(7)),
            candidate(3, "Beta Cup", 300, SCOPE_COMPETITION, None, Some(7)),
            candidate(4, "Season Pass", 400, SCOPE_SEASON, None, Some(7)),
        ];
        let suggestions = suggest_broadcasters(Some(3), Some(7), &candidates);

        let names: Vec<&str> = suggestions
            .iter()
            .map(|s| s.package_name.as_str())
            .collect();
        assert_eq!(names, vec!["Season Pass", "Alpha Cup", "Beta Cup", "Zebra Sport"]);
    }

    #[test]
    fn ranking_is_deterministic_across_input_order() {
        let mut candidates = vec![
            candidate(1, "Alpha Cup", 100, SCOPE_COMPETITION, None, Some(7)),
            candidate(2, "Beta Cup", 200, SCOPE_COMPETITION, None, Some(7)),
        ];
        let forward = suggest_broadcasters(None, Some(7), &candidates);
        candidates.reverse();
        let reversed = suggest_broadcasters(None, Some(7), &candidates);

        let ids = |list: &[Suggestion]| list.iter().map(|s| s.package_id).collect::<Vec<_>>();
        assert_eq!(ids(&forward), ids(&reversed));
    }
}
