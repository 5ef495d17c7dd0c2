use crate::application::services::{FeedbackService, ServiceError};
use crate::domain::repositories::FeedbackRepository;
use crate::interface::payloads::{ListFeedbackQuery, UploadFeedback};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

fn error_response(e: ServiceError) -> Response {
    match e {
        ServiceError::NotFound(id) => {
            tracing::info!("Feedback not found: {}", id);
            StatusCode::NOT_FOUND.into_response()
        }
        ServiceError::StoreUnavailable(e) => {
            tracing::error!("Document store call failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) async fn upload_feedback_handler<R: FeedbackRepository>(
    State(state): State<FeedbackService<R>>,
    payload: Result<Json<UploadFeedback>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Failed to parse payload: {:?}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state.upload_feedback(payload.into()).await {
        Ok(id) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/feedback/{}", id))],
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub(crate) async fn get_feedback_handler<R: FeedbackRepository>(
    State(state): State<FeedbackService<R>>,
    Path(id): Path<String>,
) -> Response {
    match state.get_feedback(&id).await {
        Ok(feedback) => Json(feedback).into_response(),
        Err(e) => error_response(e),
    }
}

pub(crate) async fn list_feedback_handler<R: FeedbackRepository>(
    State(state): State<FeedbackService<R>>,
) -> Response {
    match state.list_feedback().await {
        Ok(feedback) => Json(feedback).into_response(),
        Err(e) => error_response(e),
    }
}

pub(crate) async fn list_feedback_page_handler<R: FeedbackRepository>(
    State(state): State<FeedbackService<R>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => ListFeedbackQuery::from(pairs),
        Err(e) => {
            tracing::warn!("Ignoring malformed query string: {:?}", e);
            ListFeedbackQuery::default()
        }
    };

    match state.list_feedback_page(query.into()).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => error_response(e),
    }
}
