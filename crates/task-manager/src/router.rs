//! Route table.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::handlers;
use crate::state::AppState;

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([handlers::TOTAL_COUNT_HEADER]);

    // Routes reachable without a token
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/health", get(handlers::api_health))
        .route("/api/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/api/users/{id}",
            get(handlers::users::get)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        );

    let task_status_routes = Router::new()
        .route(
            "/api/task_statuses",
            get(handlers::task_statuses::list).post(handlers::task_statuses::create),
        )
        .route(
            "/api/task_statuses/{id}",
            get(handlers::task_statuses::get)
                .put(handlers::task_statuses::update)
                .delete(handlers::task_statuses::delete),
        );

    let label_routes = Router::new()
        .route(
            "/api/labels",
            get(handlers::labels::list).post(handlers::labels::create),
        )
        .route(
            "/api/labels/{id}",
            get(handlers::labels::get)
                .put(handlers::labels::update)
                .delete(handlers::labels::delete),
        );

    let task_routes = Router::new()
        .route(
            "/api/tasks",
            get(handlers::tasks::list).post(handlers::tasks::create),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::tasks::get)
                .put(handlers::tasks::update)
                .delete(handlers::tasks::delete),
        );

    let protected_routes = Router::new()
        .route("/api/admin", get(handlers::auth::check_admin))
        .merge(user_routes)
        .merge(task_status_routes)
        .merge(label_routes)
        .merge(task_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
