use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT token time-to-live constants
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 604800; // 7 days

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,        // Subject (account ID)
    pub email: String,      // Account email
    pub name: String,       // Account display name
    pub roles: Vec<String>, // Account roles
    pub exp: i64,           // Expiration time
    pub iat: i64,           // Issued at
    pub jti: String,        // JWT ID
}

impl JwtClaims {
    /// Whether the claims carry the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Stateless JWT authentication.
///
/// Tokens are signed with HS256 and carry all account information in the
/// claims. Expiry is enforced by signature validation; there is no
/// server-side revocation store.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt_auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.clone();

        tracing::info!("JWT auth initialized");
        Self { secret }
    }

    /// Create access token (15 min)
    pub fn create_access_token(
        &self,
        account_id: &str,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> eyre::Result<String> {
        self.create_token(account_id, email, name, roles, ACCESS_TOKEN_TTL)
    }

    /// Create refresh token (7 days)
    pub fn create_refresh_token(
        &self,
        account_id: &str,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> eyre::Result<String> {
        self.create_token(account_id, email, name, roles, REFRESH_TOKEN_TTL)
    }

    /// Create JWT token with specified TTL
    fn create_token(
        &self,
        account_id: &str,
        email: &str,
        name: &str,
        roles: &[String],
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();
        let jti = Uuid::new_v4().to_string();

        let claims = JwtClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            exp,
            iat,
            jti,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify JWT token signature and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-at-least-32-chars!"))
    }

    #[test]
    fn test_access_token_round_trip() {
        let auth = test_auth();
        let roles = vec!["USER".to_string()];
        let token = auth
            .create_access_token("account-1", "user@example.com", "User One", &roles)
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "account-1");
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.name, "User One");
        assert_eq!(claims.roles, roles);
        assert!(claims.exp > claims.iat);
        assert!(claims.exp - claims.iat <= ACCESS_TOKEN_TTL + 1);
    }

    #[test]
    fn test_refresh_token_has_longer_ttl() {
        let auth = test_auth();
        let token = auth
            .create_refresh_token("account-1", "user@example.com", "User One", &[])
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert!(claims.exp - claims.iat > ACCESS_TOKEN_TTL);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let auth = test_auth();
        let token = auth
            .create_access_token("account-1", "user@example.com", "User One", &[])
            .unwrap();

        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-chars-long!"));
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = test_auth();
        assert!(auth.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_has_role() {
        let auth = test_auth();
        let roles = vec!["USER".to_string(), "ADMIN".to_string()];
        let token = auth
            .create_access_token("account-1", "admin@example.com", "Admin", &roles)
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert!(claims.has_role("ADMIN"));
        assert!(!claims.has_role("SUPERUSER"));
    }
}
