use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::Capability;
use crate::config::{self, SecurityConfig};
use crate::handlers::{jobs, system};
use crate::middleware::{authenticate_jwt, require_capability};
use crate::state::AppState;

/// Build the full application router.
///
/// Every route declares its capability here; the gate runs before the
/// handler's extractors, so a denied request never reaches validation or
/// the store.
pub fn app(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Jobs
        .merge(job_routes())
        // Global middleware
        .layer(middleware::from_fn(authenticate_jwt))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn job_routes() -> Router<AppState> {
    use Capability::{AdminOnly, Public};

    Router::new()
        .route(
            "/jobs",
            gated(Public, get(jobs::jobs_list)).merge(gated(AdminOnly, post(jobs::jobs_create))),
        )
        .route(
            "/jobs/:id",
            gated(Public, get(jobs::job_get))
                .merge(gated(AdminOnly, patch(jobs::job_update).delete(jobs::job_remove))),
        )
}

/// Attach the capability gate to every method in `route`
fn gated(required: Capability, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(required, require_capability))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
