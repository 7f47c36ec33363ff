use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, JwtClaims, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::entity;
use crate::error::EventResult;
use crate::models::{CreateEvent, Event, EventFilter, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        update_event,
        delete_event,
        publish_event,
    ),
    components(
        schemas(Event, CreateEvent, UpdateEvent, EventFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::TAG, description = "Event management endpoints")
    )
)]
pub struct ApiDoc;

/// Router for the read-only event endpoints; no authentication required
pub fn public_router<R: EventRepository + 'static>(service: Arc<EventService<R>>) -> Router {
    Router::new()
        .route("/", get(list_events))
        .route("/{id}", get(get_event))
        .with_state(service)
}

/// Router for the mutating event endpoints; expects JWT claims in extensions
pub fn protected_router<R: EventRepository + 'static>(service: Arc<EventService<R>>) -> Router {
    Router::new()
        .route("/", post(create_event))
        .route("/{id}", axum::routing::put(update_event).delete(delete_event))
        .route("/{id}/publish", post(publish_event))
        .with_state(service)
}

fn account_id_from_claims(claims: &JwtClaims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid subject in token".to_string()))
}

/// List events with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = entity::TAG,
    params(EventFilter),
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(filter): Query<EventFilter>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events(filter).await?;
    Ok(Json(events))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    tag = entity::TAG,
    request_body = CreateEvent,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created successfully", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> Result<impl IntoResponse, AppError> {
    let manager_id = account_id_from_claims(&claims)?;
    let event = service.create_event(input, manager_id).await?;

    // Audit log successful creation
    AuditEvent::new(
        Some(claims.sub.clone()),
        "event.create",
        Some(format!("event:{}", event.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "event_name": event.name,
        "free": event.free,
        "offline": event.offline,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Event>> {
    let event = service.get_event(id).await?;
    Ok(Json(event))
}

/// Update an event; only its manager may modify it
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event updated successfully", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> Result<Json<Event>, AppError> {
    let manager_id = account_id_from_claims(&claims)?;
    let event = service.update_event(id, manager_id, input).await?;
    Ok(Json(event))
}

/// Delete an event; allowed for its manager or an admin
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> Result<impl IntoResponse, AppError> {
    let account_id = account_id_from_claims(&claims)?;
    let is_admin = claims.has_role("admin");
    service.delete_event(id, account_id, is_admin).await?;

    // Audit log successful deletion
    AuditEvent::new(
        Some(claims.sub.clone()),
        "event.delete",
        Some(format!("event:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Publish a draft event
#[utoipa::path(
    post,
    path = "/{id}/publish",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event published successfully", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn publish_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    UuidPath(id): UuidPath,
) -> Result<Json<Event>, AppError> {
    let manager_id = account_id_from_claims(&claims)?;
    let event = service.publish_event(id, manager_id).await?;
    Ok(Json(event))
}
