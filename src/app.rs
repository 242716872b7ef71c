use axum::{
    extract::State,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::pool;
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, require_admin, require_moderator};

/// Shared router state. The pool is opened once at startup and injected here;
/// handlers never reach for a process-wide store handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

pub fn app(state: AppState) -> Router {
    // Open surface: reads, registration, submissions, upvotes, reports
    let public: Router<AppState> = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(handlers::tokens::issue))
        .route("/users", post(handlers::users::create))
        .route("/users/role/:email", get(handlers::users::role))
        .route("/products", get(handlers::products::list).patch(handlers::products::upvote))
        .route("/productDetails/:id", get(handlers::products::details))
        .route("/addProduct", post(handlers::products::add))
        .route("/products/report/:id", patch(handlers::products::report))
        .route("/reviews/:id", get(handlers::reviews::list))
        .route("/reviews", post(handlers::reviews::create))
        .route("/coupons", get(handlers::coupons::list));

    // Token required, no role: reject is deliberately weaker than accept
    let authenticated: Router<AppState> = Router::new()
        .route("/products/reject/:id", patch(handlers::products::reject))
        .route("/products/update/:id", patch(handlers::products::update_fields))
        .route("/products/:id", delete(handlers::products::remove))
        .route_layer(from_fn(jwt_auth_middleware));

    // Moderator gate: exactly "moderator"; an admin token is rejected here
    let moderator: Router<AppState> = Router::new()
        .route("/products/feature/:id", patch(handlers::products::feature))
        .route("/products/accept/:id", patch(handlers::products::accept))
        .route_layer(from_fn_with_state(state.clone(), require_moderator))
        .route_layer(from_fn(jwt_auth_middleware));

    // Admin gate: role management, coupon creation, dashboard stats
    let admin: Router<AppState> = Router::new()
        .route("/users/:email", get(handlers::users::list_except))
        .route("/users/mod/:id", patch(handlers::users::promote_moderator))
        .route("/users/admin/:id", patch(handlers::users::promote_admin))
        .route("/coupons", post(handlers::coupons::create))
        .route("/stats", get(handlers::stats::summary))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(moderator)
        .merge(admin)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Launchpad API",
        "version": version,
        "description": "Product-discovery marketplace backend (Axum)",
        "endpoints": {
            "tokens": "POST /jwt (public)",
            "users": "/users, /users/role/:email (public); /users/:email, /users/mod/:id, /users/admin/:id (admin)",
            "products": "/products, /productDetails/:id, /addProduct (public); feature/accept (moderator); reject/update/delete (token)",
            "reviews": "/reviews/:id, /reviews (public)",
            "coupons": "GET /coupons (public); POST /coupons (admin)",
            "stats": "GET /stats (admin)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match pool::ping(&state.pool).await {
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
                "database_error": e.to_string()
            })),
        ),
    }
}
