//! Application builder.
//!
//! This module assembles all routes, middleware and state into an Axum
//! router.

use crate::{
    error::ErrorResponse,
    middleware::request_id_middleware,
    responses::MessageResponse,
    routes::{self, feedback, health},
    state::AppState,
};
use axum::{
    body::Body,
    http::{HeaderValue, Request, Response},
    middleware, Router,
};
use feedback_desk_common::ServerConfig;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    body::Limited,
    limit::{RequestBodyLimitLayer, ResponseBody},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the feedback API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback Desk API",
        version = "1.0.0",
        description = "Collect, search and triage user feedback",
        license(name = "MIT"),
    ),
    paths(
        health::health,
        health::ready,
        feedback::list_feedback,
        feedback::get_feedback,
        feedback::create_feedback,
        feedback::update_feedback,
        feedback::delete_feedback,
    ),
    components(schemas(
        feedback::FeedbackResponse,
        feedback::CreateFeedbackRequest,
        feedback::UpdateFeedbackRequest,
        health::HealthResponse,
        health::ReadinessResponse,
        health::ReadinessChecks,
        MessageResponse,
        ErrorResponse,
    )),
    modifiers(&BasicAuthScheme),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "feedback", description = "Feedback submission and triage"),
    )
)]
pub struct ApiDoc;

struct BasicAuthScheme;

impl Modify for BasicAuthScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
        }
    }
}

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    let mut app = Router::new()
        // Health check routes (no auth required)
        .merge(routes::health_routes())
        .nest("/api", routes::feedback_routes())
        .with_state(state);

    if server.enable_swagger {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(&server))
            .layer(TimeoutLayer::new(server.request_timeout()))
            .map_response(|res: Response<ResponseBody<Body>>| res.map(Body::new))
            .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
            .map_request(|req: Request<Limited<Body>>| req.map(Body::new))
            // Custom middleware
            .layer(middleware::from_fn(request_id_middleware)),
    )
}

/// Build CORS layer from configuration. An empty origin list allows any origin.
fn build_cors_layer(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if server.cors_origins.is_empty() || server.cors_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
