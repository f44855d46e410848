//! Shopify session-token verification.
//!
//! The embedded admin sends a short-lived HS256 JWT signed with the app's
//! API secret. Its audience is the app's API key and its `dest` claim is the
//! shop's origin (`https://acme.myshopify.com`), which is the only tenant
//! identity this server trusts.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clock skew tolerated on `exp`/`nbf`, in seconds.
const LEEWAY_SECS: u64 = 5;

/// Claims carried by a Shopify session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Shop admin URL, e.g. `https://acme.myshopify.com/admin`.
    pub iss: String,
    /// Shop origin, e.g. `https://acme.myshopify.com`.
    pub dest: String,
    /// The app's API key.
    pub aud: String,
    /// Staff user id, when the token was issued for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub jti: String,
}

/// App credentials used to verify session tokens.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Public API key (the token audience).
    pub api_key: String,
    /// API secret (the HMAC signing key).
    pub api_secret: String,
}

impl ShopifyConfig {
    /// Load the app credentials from the environment.
    ///
    /// | Env Var              | Required |
    /// |----------------------|----------|
    /// | `SHOPIFY_API_KEY`    | **yes**  |
    /// | `SHOPIFY_API_SECRET` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let api_key = std::env::var("SHOPIFY_API_KEY").expect("SHOPIFY_API_KEY must be set");
        let api_secret =
            std::env::var("SHOPIFY_API_SECRET").expect("SHOPIFY_API_SECRET must be set");
        assert!(!api_key.is_empty(), "SHOPIFY_API_KEY must not be empty");
        assert!(!api_secret.is_empty(), "SHOPIFY_API_SECRET must not be empty");
        Self {
            api_key,
            api_secret,
        }
    }
}

/// Errors raised while verifying a session token.
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token does not name a shop")]
    MissingShop,

    #[error("Token issuer does not match its destination")]
    IssuerMismatch,
}

/// Verify a session token and return the shop domain it was issued for.
pub fn verify_session_token(
    token: &str,
    config: &ShopifyConfig,
) -> Result<String, SessionTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[&config.api_key]);
    validation.validate_nbf = true;
    validation.leeway = LEEWAY_SECS;

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.api_secret.as_bytes()),
        &validation,
    )?
    .claims;

    let shop = host_of(&claims.dest).ok_or(SessionTokenError::MissingShop)?;
    if host_of(&claims.iss) != Some(shop) {
        return Err(SessionTokenError::IssuerMismatch);
    }
    Ok(shop.to_ascii_lowercase())
}

/// Sign a session token for `shop`, valid for `ttl_secs`.
///
/// Used by tests and local tooling to stand in for the Shopify admin.
pub fn issue_session_token(
    shop: &str,
    config: &ShopifyConfig,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        iss: format!("https://{shop}/admin"),
        dest: format!("https://{shop}"),
        aud: config.api_key.clone(),
        sub: None,
        exp: now + ttl_secs,
        nbf: now,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.api_secret.as_bytes()),
    )
}

/// Host part of an `https://host[/path]` URL.
fn host_of(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    (!host.is_empty()).then_some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_config() -> ShopifyConfig {
        ShopifyConfig {
            api_key: "test-api-key".to_string(),
            api_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    fn sign(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    fn claims_for(shop: &str, config: &ShopifyConfig) -> SessionClaims {
        let now = chrono::Utc::now().timestamp();
        SessionClaims {
            iss: format!("https://{shop}/admin"),
            dest: format!("https://{shop}"),
            aud: config.api_key.clone(),
            sub: Some("42".into()),
            exp: now + 60,
            nbf: now,
            iat: now,
            jti: "jti".into(),
        }
    }

    #[test]
    fn issued_token_verifies_to_its_shop() {
        let config = test_config();
        let token = issue_session_token("acme.myshopify.com", &config, 60).unwrap();
        assert_eq!(
            verify_session_token(&token, &config).unwrap(),
            "acme.myshopify.com"
        );
    }

    #[test]
    fn wrong_secret_or_audience_fails() {
        let config = test_config();
        let claims = claims_for("acme.myshopify.com", &config);

        let forged = sign(&claims, "some-other-secret-of-reasonable-length");
        assert_matches!(
            verify_session_token(&forged, &config),
            Err(SessionTokenError::Jwt(_))
        );

        let mut other_app = claims.clone();
        other_app.aud = "another-app".into();
        let token = sign(&other_app, &config.api_secret);
        assert_matches!(
            verify_session_token(&token, &config),
            Err(SessionTokenError::Jwt(_))
        );
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        let mut claims = claims_for("acme.myshopify.com", &config);
        claims.exp -= 600;
        claims.nbf -= 600;
        let token = sign(&claims, &config.api_secret);
        assert!(verify_session_token(&token, &config).is_err());
    }

    #[test]
    fn issuer_must_match_destination() {
        let config = test_config();
        let mut claims = claims_for("acme.myshopify.com", &config);
        claims.iss = "https://rival.myshopify.com/admin".into();
        let token = sign(&claims, &config.api_secret);
        assert_matches!(
            verify_session_token(&token, &config),
            Err(SessionTokenError::IssuerMismatch)
        );
    }

    #[test]
    fn host_of_extracts_host() {
        assert_eq!(host_of("https://acme.myshopify.com"), Some("acme.myshopify.com"));
        assert_eq!(host_of("https://acme.myshopify.com/admin"), Some("acme.myshopify.com"));
        assert_eq!(host_of("acme.myshopify.com"), None);
        assert_eq!(host_of("https://"), None);
    }
}
