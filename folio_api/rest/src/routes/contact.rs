use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactService, ContactSubmitError};
use folio_models::contact::ContactForm;
use tracing::debug;

use crate::{errors::error, models::ApiOk};

/// Maximum size of a contact request body in bytes (16 MiB).
///
/// Oversized messages below this limit still reach validation and are
/// answered with `message too long`.
pub const CONTACT_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .layer(DefaultBodyLimit::max(CONTACT_BODY_LIMIT))
        .with_state(service)
}

/// The body is parsed by hand instead of through the `Json` extractor so that
/// every malformed payload gets the same answer regardless of its
/// `Content-Type`.
async fn submit(
    service: State<Arc<impl ContactService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            debug!("Rejecting contact request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, "Request body too large");
        }
        Err(rejection) => {
            debug!("Failed to read contact request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, "Invalid JSON");
        }
    };

    let Ok(form) = serde_json::from_slice::<ContactForm>(&body) else {
        return error(StatusCode::BAD_REQUEST, "Invalid JSON");
    };

    match service.submit(form).await {
        Ok(_) => Json(ApiOk { ok: true }).into_response(),
        Err(err @ ContactSubmitError::Invalid(_)) => {
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err @ ContactSubmitError::Send(_)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
