use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::error;

use crate::web::{
    AppState, ErrorBody, auth,
    data::{self, SiteStats},
    responses::server_error,
};

pub async fn dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SiteStats>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let stats = data::fetch_stats(state.pool_ref()).await.map_err(|err| {
        error!(?err, "failed to load dashboard stats");
        server_error()
    })?;
    Ok(Json(stats))
}
