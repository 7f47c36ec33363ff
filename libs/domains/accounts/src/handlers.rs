use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, JwtClaims, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::entity;
use crate::error::AccountError;
use crate::models::{AccountFilter, AccountResponse, CreateAccount, UpdateAccount};
use crate::repository::AccountRepository;
use crate::service::AccountService;

/// OpenAPI documentation for Accounts API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_accounts,
        create_account,
        get_account,
        update_account,
        delete_account,
    ),
    components(
        schemas(AccountResponse, CreateAccount, UpdateAccount, AccountFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::TAG, description = "Account management endpoints")
    )
)]
pub struct ApiDoc;

/// Router for account management; expects JWT claims in extensions
pub fn router<R: AccountRepository + 'static>(service: Arc<AccountService<R>>) -> Router {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        .with_state(service)
}

fn require_admin(claims: &JwtClaims) -> Result<(), AppError> {
    if claims.has_role("admin") {
        Ok(())
    } else {
        Err(AccountError::Forbidden.into())
    }
}

fn require_self_or_admin(claims: &JwtClaims, id: Uuid) -> Result<(), AppError> {
    if claims.sub == id.to_string() || claims.has_role("admin") {
        Ok(())
    } else {
        Err(AccountError::Forbidden.into())
    }
}

/// List accounts; admin only
#[utoipa::path(
    get,
    path = "",
    tag = entity::TAG,
    params(AccountFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of accounts", body = Vec<AccountResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_accounts<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    Query(filter): Query<AccountFilter>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    require_admin(&claims)?;
    let accounts = service.list_accounts(filter).await?;
    Ok(Json(accounts))
}

/// Create an account; admin only (self-service signup goes through /auth/register)
#[utoipa::path(
    post,
    path = "",
    tag = entity::TAG,
    request_body = CreateAccount,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Account created successfully", body = AccountResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_account<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateAccount>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&claims)?;
    let account = service.create_account(input).await?;

    AuditEvent::new(
        Some(claims.sub.clone()),
        "account.create",
        Some(format!("account:{}", account.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get an account by ID; self or admin
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_account<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
) -> Result<Json<AccountResponse>, AppError> {
    require_self_or_admin(&claims, id)?;
    let account = service.get_account(id).await?;
    Ok(Json(account))
}

/// Update an account; self or admin
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccount,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account updated successfully", body = AccountResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_account<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
    ValidatedJson(mut input): ValidatedJson<UpdateAccount>,
) -> Result<Json<AccountResponse>, AppError> {
    require_self_or_admin(&claims, id)?;

    // Only admins may change role assignments
    if input.roles.is_some() && !claims.has_role("admin") {
        input.roles = None;
    }

    let account = service.update_account(id, input).await?;
    Ok(Json(account))
}

/// Delete an account; admin only
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_account<R: AccountRepository>(
    State(service): State<Arc<AccountService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&claims)?;
    service.delete_account(id).await?;

    AuditEvent::new(
        Some(claims.sub.clone()),
        "account.delete",
        Some(format!("account:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
