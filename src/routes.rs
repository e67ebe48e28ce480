use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslationOutcome};
use crate::views::{render_index, IndexView};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // HTML form
        .route("/", get(index).post(process))
        // JSON API
        .route("/api/translate", post(api_translate))
        .route("/api/health", get(health_check))
}

/// Fully layered application, ready to serve.
pub fn app(state: AppState) -> Router {
    create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_index(&IndexView::default()))
}

async fn process(
    State(state): State<AppState>,
    Form(request): Form<TranslateRequest>,
) -> Html<String> {
    debug!("Form submission: action={:?}", request.action);
    let view = match state.translator.process(request).await {
        Ok(outcome) => IndexView::from(outcome),
        Err(e) => IndexView::with_notice(e.to_string()),
    };
    Html(render_index(&view))
}

async fn api_translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslationOutcome>, (StatusCode, Json<Value>)> {
    state
        .translator
        .process(request)
        .await
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": e.to_string()})),
            )
        })
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "endpoint": state.settings.llm.endpoint,
        "translation_model": state.translator.translation_model(),
        "judge_model": state.translator.judge_model(),
    }))
}
