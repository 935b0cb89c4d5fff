//! Router assembly.
//!
//! Shared by the binary and the route-level tests so both run the same
//! middleware stack.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Request, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use cms_admin_core::{AreaKind, ContentArea};

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::routes;
use crate::state::AppState;

/// Allowance for the text of a form, matching axum's default body limit.
const TEXT_ALLOWANCE: usize = 2 * 1024 * 1024;

/// Items assumed for image lists without a `max_items` bound.
const UNBOUNDED_LIST_ITEMS: usize = 24;

/// `data:<mime>;base64,` prefix of an inline image.
const DATA_URI_PREFIX: usize = 64;

/// Largest body a section form can legitimately post.
///
/// Each image slot may carry a fresh upload next to the data URI of an
/// earlier one, which is base64 text about 4/3 of the file size.
fn form_body_limit(max_image_bytes: usize) -> usize {
    let slots = ContentArea::of_kind(AreaKind::Section)
        .filter_map(ContentArea::section_schema)
        .map(|schema| schema.image_slots(UNBOUNDED_LIST_ITEMS))
        .max()
        .unwrap_or(0);
    let inline = max_image_bytes.div_ceil(3).saturating_mul(4) + DATA_URI_PREFIX;
    slots
        .saturating_mul(max_image_bytes.saturating_add(inline))
        .saturating_add(TEXT_ALLOWANCE)
}

/// Build the full application router.
pub fn build_app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let body_limit = form_body_limit(state.config().max_image_bytes);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/admin/static"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the CMS API.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    #[test]
    fn test_body_limit_fits_a_full_image_list() {
        let max_image = 2 * MIB;
        let inline = max_image.div_ceil(3) * 4;
        let limit = form_body_limit(max_image);

        // Every unbounded image list item holds an inline image and a new upload.
        assert!(limit >= UNBOUNDED_LIST_ITEMS * (inline + max_image));
        assert!(limit > TEXT_ALLOWANCE);
    }

    #[test]
    fn test_body_limit_scales_with_image_cap() {
        assert!(form_body_limit(4 * MIB) > form_body_limit(2 * MIB));
        assert!(form_body_limit(0) >= TEXT_ALLOWANCE);
    }
}
