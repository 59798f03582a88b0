use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::handlers;
use crate::state::AppState;

const API_PREFIX: &str = "/api/v1";

/// Build the full router with its global middleware
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    let body_limit = state.api.max_request_size_bytes;

    let api = Router::new()
        .merge(design_routes())
        .merge(project_routes())
        .merge(experience_routes())
        .merge(data_routes())
        .merge(profile_routes());

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health))
        .nest(API_PREFIX, api)
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(&security.cors_origins));

    if state.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.layer(Extension(state))
}

fn design_routes() -> Router {
    use handlers::design;

    Router::new()
        .route("/design", get(design::design_list).post(design::design_create))
        .route("/design/active", get(design::design_active))
        .route(
            "/design/color-scheme",
            get(design::color_scheme_get).put(design::color_scheme_put),
        )
        .route("/design/css", get(design::design_css))
        .route("/design/palette", get(design::design_palette))
        .route("/design/by-name/:name", get(design::design_get_by_name))
        .route(
            "/design/:id",
            get(design::design_get)
                .put(design::design_update)
                .delete(design::design_delete),
        )
        .route("/design/:id/activate", post(design::design_activate))
}

fn project_routes() -> Router {
    use handlers::projects;

    Router::new()
        .route(
            "/projects",
            get(projects::projects_list).post(projects::project_create),
        )
        .route(
            "/projects/:id",
            get(projects::project_get)
                .put(projects::project_update)
                .delete(projects::project_delete),
        )
}

fn experience_routes() -> Router {
    use handlers::experiences;

    Router::new()
        .route(
            "/experiences",
            get(experiences::experiences_list).post(experiences::experience_create),
        )
        .route(
            "/experiences/:id",
            get(experiences::experience_get)
                .put(experiences::experience_update)
                .delete(experiences::experience_delete),
        )
}

fn data_routes() -> Router {
    use handlers::data;

    Router::new()
        .route("/data", get(data::data_list).post(data::data_create))
        .route("/data/search", get(data::data_search))
        .route(
            "/data/:id",
            get(data::data_get)
                .put(data::data_update)
                .delete(data::data_delete),
        )
}

fn profile_routes() -> Router {
    use handlers::{contact, portfolio, profile};

    Router::new()
        .route(
            "/profile",
            get(profile::profile_get)
                .post(profile::profile_create)
                .put(profile::profile_update),
        )
        .route("/portfolio", get(portfolio::portfolio_get))
        .route("/contact", post(contact::contact_post))
}

/// `*` allows any origin; otherwise only the listed origins are allowed
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}
