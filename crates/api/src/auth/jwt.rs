//! JWT validation for tokens minted by the external identity service.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use courtside_core::types::DbId;

/// JWT configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret shared with the identity service.
    pub secret: String,
    /// Token lifetime in seconds, used only when minting test tokens.
    pub access_ttl_secs: i64,
}

impl JwtConfig {
    /// Load from `JWT_SECRET` / `JWT_ACCESS_TTL_SECS` with dev defaults.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "courtside-dev-secret".into());
        let access_ttl_secs: i64 = std::env::var("JWT_ACCESS_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("JWT_ACCESS_TTL_SECS must be a valid i64");
        Self {
            secret,
            access_ttl_secs,
        }
    }
}

/// Claims carried by identity-service tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The actor's internal database id.
    pub sub: DbId,
    /// Role name: `owner`, `admin`, or `editor`.
    pub role: String,
    /// Display email, when the identity service includes one.
    pub email: Option<String>,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// Validate a bearer token and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Mint a token. Production tokens come from the identity service; this
/// exists for integration tests and local tooling.
pub fn issue_token(
    user_id: DbId,
    role: &str,
    email: Option<&str>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::seconds(config.access_ttl_secs))
        .timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        email: email.map(str::to_string),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
