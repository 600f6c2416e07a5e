use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::error;

use crate::export::{self, ExportKind};
use crate::web::{
    AdmissionRow, AppState, ContactRow, ErrorBody, auth, data, json_error,
    responses::{SuccessBody, not_found, server_error},
};

pub async fn list_admissions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AdmissionRow>>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let rows = data::fetch_admissions(state.pool_ref()).await.map_err(|err| {
        error!(?err, "failed to load admission applications");
        server_error()
    })?;
    Ok(Json(rows))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ContactRow>>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let rows = data::fetch_contacts(state.pool_ref()).await.map_err(|err| {
        error!(?err, "failed to load contact messages");
        server_error()
    })?;
    Ok(Json(rows))
}

pub async fn delete_admission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;
    delete_by_id(&state, "admission_applications", id).await
}

pub async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;
    delete_by_id(&state, "contact_messages", id).await
}

async fn delete_by_id(
    state: &AppState,
    table: &'static str,
    id: i64,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
        .bind(id)
        .execute(state.pool_ref())
        .await
        .map_err(|err| {
            error!(?err, table, id, "failed to delete record");
            server_error()
        })?;

    if result.rows_affected() == 0 {
        return Err(not_found());
    }
    Ok(Json(SuccessBody::ok()))
}

/// CSV download of all rows of one kind, named `{kind}_{YYYY-MM-DD}.csv`.
pub async fn export_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let kind = ExportKind::from_str(&kind)
        .ok_or_else(|| json_error(StatusCode::BAD_REQUEST, "Unknown export kind"))?;

    let body = match kind {
        ExportKind::Admissions => {
            let rows = data::fetch_admissions(state.pool_ref()).await.map_err(|err| {
                error!(?err, "failed to load admissions for export");
                server_error()
            })?;
            export::admissions_csv(&rows)
        }
        ExportKind::Contacts => {
            let rows = data::fetch_contacts(state.pool_ref()).await.map_err(|err| {
                error!(?err, "failed to load contacts for export");
                server_error()
            })?;
            export::contacts_csv(&rows)
        }
    };

    let filename = export::csv_filename(kind, Utc::now().date_naive());
    attachment_response(body.into_bytes(), "text/csv; charset=utf-8", &filename)
}

/// Streams the rendered admission form with an attachment disposition.
pub async fn download_admission_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    auth::require_admin(&state, &headers)?;

    let admission = data::fetch_admission(state.pool_ref(), id)
        .await
        .map_err(|err| {
            error!(?err, id, "failed to load admission for PDF export");
            server_error()
        })?
        .ok_or_else(not_found)?;

    let bytes = export::render_admission_pdf(&admission).await.map_err(|err| {
        error!(?err, id, "failed to render admission PDF");
        server_error()
    })?;

    attachment_response(bytes, "application/pdf", &export::pdf_filename(id))
}

fn attachment_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    filename: &str,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

    let disposition = format!("attachment; filename=\"{filename}\"");
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|_| json_error(StatusCode::INTERNAL_SERVER_ERROR, "Invalid download header"))?;
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok((headers, bytes).into_response())
}
