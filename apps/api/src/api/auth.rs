use axum::Router;
use domain_accounts::{
    AccountService, PgAccountRepository,
    auth_handlers::{AuthState, auth_router},
};

pub fn router(state: &crate::state::AppState) -> Router {
    // Use PostgreSQL repository with database connection
    let repository = PgAccountRepository::new(state.db.clone());
    let service = AccountService::new(repository);

    // Create auth state with JWT authentication
    let auth_state = AuthState {
        service,
        jwt_auth: state.jwt_auth.clone(),
    };

    auth_router(auth_state)
}
