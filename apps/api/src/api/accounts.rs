use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_accounts::{AccountService, PgAccountRepository, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgAccountRepository::new(state.db.clone());
    let service = Arc::new(AccountService::new(repository));

    // All account management requires a valid token
    handlers::router(service).route_layer(middleware::from_fn_with_state(
        state.jwt_auth.clone(),
        jwt_auth_middleware,
    ))
}
