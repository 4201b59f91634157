//! Well-known role name constants and ordering.
//!
//! Roles arrive in JWT claims minted by the external identity service;
//! these constants must match the claim values it issues.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Numeric rank for role comparison. Higher outranks lower.
///
/// Returns `None` for unknown role names so callers treat them as
/// unprivileged rather than panicking.
pub fn role_rank(role: &str) -> Option<u8> {
    match role {
        ROLE_OWNER => Some(3),
        ROLE_ADMIN => Some(2),
        ROLE_EDITOR => Some(1),
        _ => None,
    }
}

/// True if `role` is at or above `required`.
pub fn role_at_least(role: &str, required: &str) -> bool {
    match (role_rank(role), role_rank(required)) {
        (Some(have), Some(need)) => have >= need,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_outranks_admin() {
        assert!(role_at_least(ROLE_OWNER, ROLE_ADMIN));
    }

    #[test]
    fn admin_meets_admin() {
        assert!(role_at_least(ROLE_ADMIN, ROLE_ADMIN));
    }

    #[test]
    fn editor_below_admin() {
        assert!(!role_at_least(ROLE_EDITOR, ROLE_ADMIN));
    }

    #[test]
    fn admin_below_owner() {
        assert!(!role_at_least(ROLE_ADMIN, ROLE_OWNER));
    }

    #[test]
    fn unknown_role_never_qualifies() {
        assert!(!role_at_least("superuser", ROLE_EDITOR));
        assert!(!role_at_least(ROLE_OWNER, "superuser"));
    }
}
