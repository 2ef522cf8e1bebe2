use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

pub mod accounts;
pub mod auth;
pub mod bookings;
pub mod educations;
pub mod employees;
mod error;
pub mod rooms;
mod system;
mod types;
mod universities;
mod validation;

pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn accounts(&self) -> &Arc<dyn crate::services::AccountService> {
        &self.shared.account_service
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<crate::tokens::TokenIssuer> {
        &self.shared.tokens
    }
}

pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/accounts/register", post(auth::register))
        .route("/accounts/login", post(auth::login))
        .route(
            "/accounts/forgot-password/{email}",
            post(auth::forgot_password),
        )
        .route("/accounts/change-password", put(auth::change_password))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(accounts::list_accounts))
        .route("/accounts", post(accounts::create_account))
        .route("/accounts", put(accounts::update_account))
        .route("/accounts/{guid}", get(accounts::get_account))
        .route("/accounts/{guid}", delete(accounts::delete_account))
        .route("/employees", get(employees::list_employees))
        .route("/employees", post(employees::create_employee))
        .route("/employees/{guid}", get(employees::get_employee))
        .route("/employees/{guid}", put(employees::update_employee))
        .route("/employees/{guid}", delete(employees::delete_employee))
        .route("/universities", get(universities::list_universities))
        .route("/universities", post(universities::create_university))
        .route("/universities/{guid}", get(universities::get_university))
        .route("/universities/{guid}", put(universities::update_university))
        .route(
            "/universities/{guid}",
            delete(universities::delete_university),
        )
        .route("/educations", get(educations::list_educations))
        .route("/educations", post(educations::create_education))
        .route("/educations/{guid}", get(educations::get_education))
        .route("/educations/{guid}", put(educations::update_education))
        .route("/educations/{guid}", delete(educations::delete_education))
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms", post(rooms::create_room))
        .route("/rooms/{guid}", get(rooms::get_room))
        .route("/rooms/{guid}", put(rooms::update_room))
        .route("/rooms/{guid}", delete(rooms::delete_room))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/{guid}", get(bookings::get_booking))
        .route("/bookings/{guid}", put(bookings::update_booking))
        .route("/bookings/{guid}", delete(bookings::delete_booking))
        .route("/system/status", get(system::get_status))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
