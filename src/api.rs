// HTTP surface - the movie catalog proxy and comment store endpoints.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{
    app_state::AppState,
    catalog::filter_youtube,
    error::{AppError, AppResult},
    middleware::require_viewer,
    models::{CommentView, CreateCommentRequest, VideoListing},
    viewer::ViewerContext,
};

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
}

pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Movie catalog proxy
        .route("/movies/trending", get(trending_handler))
        .route("/movies/search", get(search_handler))
        .route("/movies/videos/{movie_id}", get(movie_videos_handler))
        // Comment store
        .route("/comments/{movie_id}", get(list_comments_handler))
        .route(
            "/comments",
            post(create_comment_handler)
                .route_layer(from_fn_with_state(state.clone(), require_viewer)),
        )
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cinescope",
        "timestamp": Utc::now().timestamp_millis()
    }))
}

async fn trending_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let payload = state.catalog.trending().await?;
    Ok(Json(payload))
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Value>> {
    let query = params
        .query
        .ok_or_else(|| AppError::Validation("query parameter is required".to_string()))?;

    let payload = state.catalog.search(&query).await?;
    Ok(Json(payload))
}

async fn movie_videos_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<VideoListing>> {
    let listing = state.catalog.movie_videos(movie_id).await?;
    Ok(Json(filter_youtube(listing)))
}

async fn list_comments_handler(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Vec<CommentView>>> {
    let comments = state.db.comments_for_movie(movie_id).await?;
    Ok(Json(comments))
}

async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(viewer): Extension<ViewerContext>,
    Json(request): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentView>)> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    info!(
        "Creating comment on movie {} for user {} ({})",
        request.movie_id, viewer.user_id, viewer.request_id
    );

    let comment = state
        .db
        .insert_comment(viewer.user_id, request.movie_id, &request.content)
        .await?;

    let view = CommentView::new(comment, viewer.username);
    Ok((StatusCode::CREATED, Json(view)))
}
