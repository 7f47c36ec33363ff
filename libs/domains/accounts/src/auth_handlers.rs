use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{ACCESS_TOKEN_TTL, JwtAuth, REFRESH_TOKEN_TTL, ValidatedJson};

use crate::error::AccountError;
use crate::models::{AccountResponse, CreateAccount, LoginRequest, LoginResponse, RegisterRequest};
use crate::repository::AccountRepository;
use crate::service::AccountService;

/// Application state for auth handlers
#[derive(Clone)]
pub struct AuthState<R: AccountRepository> {
    pub service: AccountService<R>,
    pub jwt_auth: JwtAuth,
}

/// Check if running in development mode
fn is_development() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env == "development")
        .unwrap_or_else(|_| cfg!(debug_assertions))
}

/// Issue access and refresh tokens for an account and build the cookie pair
fn issue_tokens<R: AccountRepository>(
    state: &AuthState<R>,
    account: &AccountResponse,
) -> Result<(HeaderValue, HeaderValue), AccountError> {
    let account_id = account.id.to_string();

    let access_token = state
        .jwt_auth
        .create_access_token(&account_id, &account.email, &account.name, &account.roles)
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            AccountError::Internal("Failed to create token".to_string())
        })?;

    let refresh_token = state
        .jwt_auth
        .create_refresh_token(&account_id, &account.email, &account.name, &account.roles)
        .map_err(|e| {
            tracing::error!("Failed to create refresh token: {:?}", e);
            AccountError::Internal("Failed to create token".to_string())
        })?;

    let secure_flag = if is_development() { "" } else { " Secure;" };
    let access_cookie = format!(
        "access_token={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        access_token, secure_flag, ACCESS_TOKEN_TTL
    );
    let refresh_cookie = format!(
        "refresh_token={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        refresh_token, secure_flag, REFRESH_TOKEN_TTL
    );

    let access_header = HeaderValue::from_str(&access_cookie)
        .map_err(|e| AccountError::Internal(format!("Failed to create cookie: {}", e)))?;
    let refresh_header = HeaderValue::from_str(&refresh_cookie)
        .map_err(|e| AccountError::Internal(format!("Failed to create cookie: {}", e)))?;

    Ok((access_header, refresh_header))
}

/// Register a new account
async fn register<R: AccountRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<Response, AccountError> {
    let account = state
        .service
        .create_account(CreateAccount {
            email: input.email,
            name: input.name,
            password: input.password,
            roles: vec![],
        })
        .await?;

    let (access_cookie, refresh_cookie) = issue_tokens(&state, &account)?;

    let response = LoginResponse { account };

    Ok((
        StatusCode::CREATED,
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(response),
    )
        .into_response())
}

/// Login with email/password
async fn login<R: AccountRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Response, AccountError> {
    let account = state
        .service
        .verify_credentials(&input.email, &input.password)
        .await?;

    let (access_cookie, refresh_cookie) = issue_tokens(&state, &account)?;

    let response = LoginResponse { account };

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(response),
    )
        .into_response())
}

/// Exchange a refresh token for a fresh token pair
async fn refresh<R: AccountRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
) -> Result<Response, AccountError> {
    let cookies = headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .ok_or(AccountError::Unauthorized)?;

    let refresh_token =
        extract_cookie_value(cookies, "refresh_token").ok_or(AccountError::Unauthorized)?;

    let claims = state
        .jwt_auth
        .verify_token(&refresh_token)
        .map_err(|_| AccountError::Unauthorized)?;

    // Re-read the account so role or profile changes take effect
    let account_id =
        uuid::Uuid::parse_str(&claims.sub).map_err(|_| AccountError::Unauthorized)?;
    let account = state.service.get_account(account_id).await?;

    let (access_cookie, refresh_cookie) = issue_tokens(&state, &account)?;

    let response = LoginResponse { account };

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(response),
    )
        .into_response())
}

/// Logout by clearing the token cookies
///
/// Tokens are stateless, so logout simply drops the cookies; the tokens
/// themselves remain valid until expiry.
async fn logout<R: AccountRepository>(
    State(_state): State<AuthState<R>>,
) -> Result<Response, AccountError> {
    let secure_flag = if is_development() { "" } else { " Secure;" };
    let clear_access = format!(
        "access_token=; HttpOnly;{} SameSite=Strict; Path=/; Max-Age=0",
        secure_flag
    );
    let clear_refresh = format!(
        "refresh_token=; HttpOnly;{} SameSite=Strict; Path=/; Max-Age=0",
        secure_flag
    );

    let clear_access_header = HeaderValue::from_str(&clear_access)
        .map_err(|e| AccountError::Internal(format!("Failed to create cookie: {}", e)))?;
    let clear_refresh_header = HeaderValue::from_str(&clear_refresh)
        .map_err(|e| AccountError::Internal(format!("Failed to create cookie: {}", e)))?;

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, clear_access_header),
            (header::SET_COOKIE, clear_refresh_header),
        ]),
        StatusCode::NO_CONTENT,
    )
        .into_response())
}

/// Get current account from JWT claims
async fn me<R: AccountRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
) -> Result<Json<AccountResponse>, AccountError> {
    let token = extract_token(&headers).ok_or(AccountError::Unauthorized)?;

    let claims = state
        .jwt_auth
        .verify_token(&token)
        .map_err(|_| AccountError::Unauthorized)?;

    let account_id =
        uuid::Uuid::parse_str(&claims.sub).map_err(|_| AccountError::Unauthorized)?;

    let account = state.service.get_account(account_id).await?;

    Ok(Json(account))
}

/// Helper: Extract token from Authorization header or cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            extract_cookie_value(
                headers.get("cookie").and_then(|v| v.to_str().ok())?,
                "access_token",
            )
        })
}

/// Helper: Extract cookie value by name
fn extract_cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
        if parts.len() == 2 && parts[0] == name {
            Some(parts[1].to_string())
        } else {
            None
        }
    })
}

/// Create auth router
pub fn auth_router<R>(state: AuthState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .route("/refresh", post(refresh::<R>))
        .route("/logout", post(logout::<R>))
        .route("/me", get(me::<R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cookie_value() {
        let cookies = "access_token=abc123; refresh_token=def456; other=xyz";
        assert_eq!(
            extract_cookie_value(cookies, "access_token"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_cookie_value(cookies, "refresh_token"),
            Some("def456".to_string())
        );
        assert_eq!(extract_cookie_value(cookies, "missing"), None);
    }

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer tok-1"));
        headers.insert("cookie", HeaderValue::from_static("access_token=tok-2"));

        assert_eq!(extract_token(&headers), Some("tok-1".to_string()));
    }

    #[test]
    fn test_extract_token_falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("access_token=tok-2"));

        assert_eq!(extract_token(&headers), Some("tok-2".to_string()));
    }
}
