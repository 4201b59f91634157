//! Territory code validation and set operations.
//!
//! Territory codes are ISO 3166-1 alpha-2, stored uppercase. Set
//! operations return sorted, de-duplicated vectors so API responses are
//! deterministic regardless of input or storage order.

use crate::error::CoreError;

/// Validate a single territory code: exactly two ASCII uppercase letters.
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    let ok = code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase());
    if !ok {
        return Err(CoreError::Validation(format!(
            "Invalid territory code '{code}': expected two uppercase letters"
        )));
    }
    Ok(())
}

/// Trim and uppercase a raw code, then validate it.
pub fn normalize_code(raw: &str) -> Result<String, CoreError> {
    let code = raw.trim().to_ascii_uppercase();
    validate_code(&code)?;
    Ok(code)
}

/// Normalize a list of raw codes, dropping duplicates, sorted.
///
/// Fails on the first invalid code; no partial result is returned.
pub fn normalize_codes(raw: &[String]) -> Result<Vec<String>, CoreError> {
    let mut codes = raw
        .iter()
        .map(|c| normalize_code(c))
        .collect::<Result<Vec<_>, _>>()?;
    codes.sort();
    codes.dedup();
    Ok(codes)
}

/// Effective coverage of a grant: allowed minus blocked.
///
/// A code present in both lists is excluded -- the block list always wins
/// within a single grant.
pub fn effective_coverage(allowed: &[String], blocked: &[String]) -> Vec<String> {
    let mut out: Vec<String> = allowed
        .iter()
        .filter(|code| !blocked.contains(code))
        .cloned()
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Intersection of two territory lists, sorted and de-duplicated.
pub fn overlap(a: &[String], b: &[String]) -> Vec<String> {
    let mut out: Vec<String> = a.iter().filter(|code| b.contains(code)).cloned().collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // -----------------------------------------------------------------------
    // Code validation
    // -----------------------------------------------------------------------

    #[test]
    fn accepts_two_uppercase_letters() {
        assert!(validate_code("FR").is_ok());
        assert!(validate_code("GB").is_ok());
    }

    #[test]
    fn rejects_lowercase() {
        assert!(validate_code("fr").is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(validate_code("F").is_err());
        assert!(validate_code("FRA").is_err());
        assert!(validate_code("").is_err());
    }

    #[test]
    fn rejects_non_letters() {
        assert!(validate_code("F1").is_err());
        assert!(validate_code("--").is_err());
    }

    #[test]
    fn normalize_uppercases_and_trims() {
        assert_eq!(normalize_code(" fr ").unwrap(), "FR");
    }

    #[test]
    fn normalize_codes_sorts_and_dedupes() {
        let input = codes(&["de", "FR", " fr "]);
        assert_eq!(normalize_codes(&input).unwrap(), codes(&["DE", "FR"]));
    }

    #[test]
    fn normalize_codes_fails_on_any_invalid() {
        let input = codes(&["FR", "bogus"]);
        assert!(normalize_codes(&input).is_err());
    }

    // -----------------------------------------------------------------------
    // Coverage and overlap
    // -----------------------------------------------------------------------

    #[test]
    fn block_beats_allow() {
        let allowed = codes(&["FR", "BE", "DE"]);
        let blocked = codes(&["BE"]);
        assert_eq!(
            effective_coverage(&allowed, &blocked),
            codes(&["DE", "FR"])
        );
    }

    #[test]
    fn empty_block_list_keeps_all() {
        let allowed = codes(&["FR", "BE"]);
        assert_eq!(effective_coverage(&allowed, &[]), codes(&["BE", "FR"]));
    }

    #[test]
    fn overlap_is_sorted_intersection() {
        let a = codes(&["DE", "BE", "FR"]);
        let b = codes(&["BE", "NL", "DE"]);
        assert_eq!(overlap(&a, &b), codes(&["BE", "DE"]));
    }

    #[test]
    fn disjoint_lists_have_no_overlap() {
        let a = codes(&["FR"]);
        let b = codes(&["DE"]);
        assert!(overlap(&a, &b).is_empty());
    }

    #[test]
    fn overlap_with_empty_list_is_empty() {
        let a = codes(&["FR"]);
        assert!(overlap(&a, &[]).is_empty());
        assert!(overlap(&[], &a).is_empty());
    }
}
