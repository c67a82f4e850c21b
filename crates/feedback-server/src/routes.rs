use std::path::Path;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, reject_hidden_paths, request_id, RateLimitState, RequestId,
};
use crate::pages;

const SAVE_FAILED_MESSAGE: &str = "Failed to save feedback. Please try again. If the problem \
                                   persists, please report this error to the system administrator.";

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub max_message_length: usize,
}

/// Raw `application/x-www-form-urlencoded` body of `POST /submit`.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn build_app(state: AppState, static_path: &Path, rate_limit: RateLimitState) -> Router {
    let submit_routes = Router::new()
        .route("/submit", post(submit_feedback))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    let static_routes = Router::new()
        .nest_service("/static", ServeDir::new(static_path))
        .layer(axum::middleware::from_fn(reject_hidden_paths));

    Router::new()
        .route("/", get(feedback_form))
        .route("/thanks", get(thanks))
        .route("/health", get(health))
        .merge(submit_routes)
        .merge(static_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
        .with_state(state)
}

async fn feedback_form(State(state): State<AppState>) -> Html<String> {
    Html(pages::feedback_form(state.max_message_length, None))
}

fn form_with_error(status: StatusCode, max_message_length: usize, message: &str) -> Response {
    (
        status,
        Html(pages::feedback_form(max_message_length, Some(message))),
    )
        .into_response()
}

async fn submit_feedback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<SubmitForm>,
) -> Response {
    let submission = match feedback_core::validate_submission(
        &form.sentiment,
        form.message.as_deref(),
        state.max_message_length,
    ) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::info!(request_id = %req_id.0, error = %e, "rejected feedback submission");
            return form_with_error(
                StatusCode::BAD_REQUEST,
                state.max_message_length,
                &e.to_string(),
            );
        }
    };

    match feedback_db::insert_feedback(
        &state.pool,
        submission.sentiment,
        submission.message.as_deref(),
    )
    .await
    {
        Ok(row) => {
            tracing::info!(
                request_id = %req_id.0,
                id = row.id,
                sentiment = %submission.sentiment,
                "feedback saved"
            );
            Redirect::to("/thanks").into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "failed to save feedback");
            form_with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                state.max_message_length,
                SAVE_FAILED_MESSAGE,
            )
        }
    }
}

async fn thanks() -> Html<String> {
    Html(pages::thanks())
}

async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match feedback_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, "OK\n"),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable\n")
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}
