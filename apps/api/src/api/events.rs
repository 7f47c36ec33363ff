use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_events::{EventService, PgEventRepository, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgEventRepository::new(state.db.clone());
    let service = Arc::new(EventService::new(repository));

    // Reads are public; mutations require a valid token
    let protected = handlers::protected_router(service.clone()).route_layer(
        middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware),
    );

    handlers::public_router(service).merge(protected)
}
