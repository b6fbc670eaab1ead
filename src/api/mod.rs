//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; the health check and
//! the WebSocket endpoint live at the root.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};
use crate::ws::handler::ws_handler;

/// OpenAPI description of the REST endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "route-ledger", description = "Local booking ledger for transport routes"),
    paths(
        handlers::route::create_route,
        handlers::route::list_routes,
        handlers::route::delete_route,
        handlers::route::route_times,
        handlers::booking::book_seat,
        handlers::booking::list_bookings,
        handlers::feedback::submit_feedback,
        handlers::report::route_report,
        handlers::report::feedback_report,
        handlers::system::health_handler,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "Routes", description = "Route management"),
        (name = "Bookings", description = "Seat bookings"),
        (name = "Feedback", description = "User feedback"),
        (name = "Reports", description = "Aggregated views"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the full application: REST API, WebSocket endpoint, tracing
/// and CORS layers, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
