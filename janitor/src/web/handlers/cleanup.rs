// Cleanup endpoint: manual trigger or status page

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use tracing::{error, info};

use super::common::{ErrorReply, ErrorResponse};
use crate::cleanup::{CleanupReport, Trigger};
use crate::constants::web::MANUAL_TRIGGER;
use crate::errors::CleanupError;
use crate::web::status_page::{render_status_page, StatusView};
use crate::web::AppState;

/// Single entry point for every method and path. `?trigger=manual` runs a
/// cleanup and returns the report; anything else renders the status page.
pub async fn cleanup_endpoint(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if is_manual_trigger(&params) {
        run_manual_cleanup(&state).await.into_response()
    } else {
        render_status(&state).await.into_response()
    }
}

fn is_manual_trigger(params: &HashMap<String, String>) -> bool {
    params.get("trigger").map(String::as_str) == Some(MANUAL_TRIGGER)
}

/// Per-path failures still produce 200 with `success: false`; only a run that
/// could not produce a report maps to an error status.
async fn run_manual_cleanup(state: &AppState) -> Result<Json<CleanupReport>, ErrorReply> {
    info!("Manual cleanup requested");

    match state.cleanup_service.run(Trigger::Manual).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            let status = match e {
                CleanupError::AlreadyRunning { .. } => StatusCode::CONFLICT,
                CleanupError::InvalidTarget { .. } | CleanupError::Interrupted { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            error!("Manual cleanup rejected ({}): {}", status, e);
            Err((
                status,
                Json(ErrorResponse::new(
                    e.to_string(),
                    state
                        .clock
                        .now()
                        .with_timezone(&state.cleanup_service.timezone()),
                )),
            ))
        }
    }
}

async fn render_status(state: &AppState) -> Html<String> {
    let view = StatusView::collect(state).await;
    Html(render_status_page(&view))
}
