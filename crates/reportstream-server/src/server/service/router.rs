use super::handler::{
    ReportService, get_hapaks, get_report, health, run_chat_stream, submit_feedback,
};
use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
};
use reportstream_api::types::{QUERY_ID_HEADER, REQUEST_IDS_HEADER};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Builds the full route table around `service`.
pub fn build_router(service: ReportService) -> Router {
    Router::new()
        .route("/run_chat_stream", post(run_chat_stream))
        .route("/get_report", post(get_report))
        .route("/submit_feedback", post(submit_feedback))
        .route("/get_hapaks", get(get_hapaks))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(service)
}

/// Any origin, method and header is accepted together with credentials.
/// Credentials rule out wildcards, so each is mirrored from the request.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([
            HeaderName::from_static(REQUEST_IDS_HEADER),
            HeaderName::from_static(QUERY_ID_HEADER),
        ])
}
