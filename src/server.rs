use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config;
use crate::handlers::{admin, protected, public};
use crate::middleware::{optional_auth, require_admin, require_auth, require_super_admin};

pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(user_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve() {
    let app = app();
    let bind_addr = format!("0.0.0.0:{}", config::config().api.port);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Yanora API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.expect("server");
}

/// Routes that need no token. Booking submission carries the optional-auth
/// layer so a signed-in caller's booking is linked to their account.
fn public_routes() -> Router {
    Router::new()
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
        .route("/auth/logout", post(public::auth::logout))
        .route("/admin/login", post(admin::login::login))
        .route("/cases/simple", get(public::cases::list_simple))
        .route("/cases/detailed", get(public::cases::list_detailed))
        .merge(
            Router::new()
                .route("/bookings", post(public::bookings::create))
                .route_layer(middleware::from_fn(optional_auth)),
        )
}

/// Routes for any authenticated user
fn user_routes() -> Router {
    Router::new()
        .route("/auth/me", get(protected::auth::me))
        .route("/bookings", get(protected::bookings::list_mine))
        .route("/bookings/:id/payment", post(protected::bookings::complete_payment))
        .layer(middleware::from_fn(require_auth))
}

/// Back-office routes. Every route passes the token gate then the admin gate;
/// admin-management mutations additionally pass the super_admin gate.
fn admin_routes() -> Router {
    let super_admin_routes = Router::new()
        .route("/admin/admins", post(admin::admins::create))
        .route(
            "/admin/admins/:user_id",
            patch(admin::admins::update).delete(admin::admins::remove),
        )
        .route_layer(middleware::from_fn(require_super_admin));

    Router::new()
        .route("/admin/admins", get(admin::admins::list))
        .merge(super_admin_routes)
        .route("/bookings/all", get(admin::bookings::list_all))
        .route(
            "/bookings/:id",
            patch(admin::bookings::update).delete(admin::bookings::remove),
        )
        .route("/cases/simple/all", get(admin::cases::list_all_simple))
        .route("/cases/simple", post(admin::cases::create_simple))
        .route(
            "/cases/simple/:id",
            patch(admin::cases::update_simple).delete(admin::cases::remove_simple),
        )
        .route("/cases/detailed/all", get(admin::cases::list_all_detailed))
        .route("/cases/detailed", post(admin::cases::create_detailed))
        .route(
            "/cases/detailed/:id",
            patch(admin::cases::update_detailed).delete(admin::cases::remove_detailed),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn(require_auth))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Yanora API",
        "version": version,
        "endpoints": {
            "auth": "/auth/register, /auth/login, /auth/logout (public), /auth/me (user)",
            "admin": "/admin/login (public), /admin/admins (admin, mutations super_admin)",
            "bookings": "/bookings (create public, list user), /bookings/all (admin), /bookings/:id (admin)",
            "cases": "/cases/simple, /cases/detailed (public), /cases/*/all and mutations (admin)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "error": "database unavailable",
                "database_error": e.to_string()
            })),
        ),
    }
}
