use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use tracing::error;

use crate::web::{
    AppState, ErrorBody, NewsRow, auth, data, json_error,
    responses::{SuccessBody, not_found, server_error},
};

#[derive(Deserialize)]
pub struct NewsPayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub async fn list_news(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<NewsRow>>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let news = data::fetch_all_news(state.pool_ref()).await.map_err(|err| {
        error!(?err, "failed to load news for admin");
        server_error()
    })?;
    Ok(Json(news))
}

pub async fn create_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<NewsRow>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;
    let (title, content) = validate_payload(payload)?;

    let row = sqlx::query_as::<_, NewsRow>(
        "INSERT INTO news_items (title, content) VALUES ($1, $2) \
         RETURNING id, title, content, date, created_at",
    )
    .bind(title)
    .bind(content)
    .fetch_one(state.pool_ref())
    .await
    .map_err(|err| {
        error!(?err, "failed to create news item");
        server_error()
    })?;

    Ok(Json(row))
}

pub async fn update_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;
    let (title, content) = validate_payload(payload)?;

    // Updates refresh the display date alongside the body.
    let result = sqlx::query(
        "UPDATE news_items SET title = $2, content = $3, date = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .execute(state.pool_ref())
    .await
    .map_err(|err| {
        error!(?err, id, "failed to update news item");
        server_error()
    })?;

    if result.rows_affected() == 0 {
        return Err(not_found());
    }
    Ok(Json(SuccessBody::ok()))
}

pub async fn delete_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let result = sqlx::query("DELETE FROM news_items WHERE id = $1")
        .bind(id)
        .execute(state.pool_ref())
        .await
        .map_err(|err| {
            error!(?err, id, "failed to delete news item");
            server_error()
        })?;

    if result.rows_affected() == 0 {
        return Err(not_found());
    }
    Ok(Json(SuccessBody::ok()))
}

fn validate_payload(payload: NewsPayload) -> Result<(String, String), (StatusCode, Json<ErrorBody>)> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let content = payload
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    match (title, content) {
        (Some(title), Some(content)) => Ok((title.to_string(), content.to_string())),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "Title and content are required",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_requires_title_and_content() {
        let ok = validate_payload(NewsPayload {
            title: Some("Sports Day".into()),
            content: Some("  Annual sports day on Friday.  ".into()),
        })
        .expect("valid payload");
        assert_eq!(ok.0, "Sports Day");
        assert_eq!(ok.1, "Annual sports day on Friday.");

        assert!(validate_payload(NewsPayload {
            title: Some("Sports Day".into()),
            content: Some("   ".into()),
        })
        .is_err());

        assert!(validate_payload(NewsPayload {
            title: None,
            content: Some("body".into()),
        })
        .is_err());
    }
}
