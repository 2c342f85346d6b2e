use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AnalysisError;
use crate::handlers::AnalysisHandler;
use crate::services::ingestion;

pub struct AppState {
    pub handler: Arc<AnalysisHandler>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the application router: the page itself, the analyze endpoint the
/// page posts to, and a health probe.
pub fn create_router(handler: Arc<AnalysisHandler>) -> Router {
    let state = Arc::new(AppState { handler });

    Router::new()
        .route("/", get(index_page))
        .route("/api/analyze", post(analyze_handler))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Handle one submission: read the uploaded file out of the multipart body,
/// gate its extension, then run ingestion and the inference call in sequence.
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut staged = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        log::error!("❌ Failed to read multipart field: {}", e);
        bad_request("malformed upload")
    })? {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            log::error!("❌ Failed to read upload body: {}", e);
            bad_request("malformed upload")
        })?;

        // An empty part with no filename is a submission with nothing staged
        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }

        log::info!("📨 Upload received: {} ({} bytes)", file_name, bytes.len());

        staged = Some(ingestion::stage_upload(&file_name, bytes.to_vec()).map_err(error_reply)?);
    }

    let text = state
        .handler
        .analyze_upload(staged)
        .await
        .map_err(error_reply)?;

    log::info!("✅ Analysis complete ({} characters)", text.len());

    Ok(Json(AnalysisResponse { text }))
}

fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::NoImage | AnalysisError::EmptyImage => StatusCode::BAD_REQUEST,
        AnalysisError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        AnalysisError::Remote(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_reply(err: AnalysisError) -> (StatusCode, Json<ErrorResponse>) {
    log::error!("❌ Analysis failed: {}", err);
    (
        status_for(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&AnalysisError::NoImage), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&AnalysisError::EmptyImage),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AnalysisError::UnsupportedFormat("gif".to_string())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status_for(&AnalysisError::Remote(RemoteError::Auth)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&AnalysisError::Remote(RemoteError::EmptyResponse)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_reply_carries_the_message() {
        let (status, body) = error_reply(AnalysisError::NoImage);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "no image uploaded");
    }
}
