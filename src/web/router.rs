use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use crate::web::{AppState, admin, admin_ui, auth, pages, public_api};

// Admission submissions carry an inline base64 photo, so the default 2 MB
// body limit is too small.
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home_page))
        .route("/admission", get(pages::admission_page))
        .route("/contact", get(pages::contact_page))
        .route("/gallery", get(pages::gallery_page))
        .route("/director", get(pages::director_page))
        .route("/admin", get(admin_ui::admin_page))
        .route("/healthz", get(healthz))
        .route("/api/news", get(public_api::list_news))
        .route("/api/admission", post(public_api::submit_admission))
        .route("/api/contact", post(public_api::submit_contact))
        .route("/api/stats", get(public_api::public_stats))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/change-password", post(auth::change_password))
        .route(
            "/api/admin/news",
            get(admin::list_news).post(admin::create_news),
        )
        .route(
            "/api/admin/news/:id",
            axum::routing::put(admin::update_news).delete(admin::delete_news),
        )
        .route("/api/admin/admissions", get(admin::list_admissions))
        .route("/api/admin/admissions/:id", delete(admin::delete_admission))
        .route("/api/admin/contacts", get(admin::list_contacts))
        .route("/api/admin/contacts/:id", delete(admin::delete_contact))
        .route("/api/admin/dashboard-stats", get(admin::dashboard_stats))
        .route("/api/admin/export/:kind", get(admin::export_csv))
        .route(
            "/api/admin/admission-pdf/:id",
            get(admin::download_admission_pdf),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
