use crate::application::services::FeedbackService;
use crate::domain::repositories::FeedbackRepository;
use crate::interface::handlers::{
    get_feedback_handler, list_feedback_handler, list_feedback_page_handler,
    upload_feedback_handler,
};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_feedback_router<R: FeedbackRepository>(repo: R) -> Router {
    let state = FeedbackService::builder().repo(repo).build();

    Router::new()
        .route(
            "/",
            get(list_feedback_page_handler::<R>).post(upload_feedback_handler::<R>),
        )
        .route("/all", get(list_feedback_handler::<R>))
        .route("/{id}", get(get_feedback_handler::<R>))
        .with_state(state)
}

pub fn create_app<R: FeedbackRepository>(repo: R) -> Router {
    Router::new()
        .nest("/feedback", create_feedback_router(repo))
        .layer(TraceLayer::new_for_http())
}
