pub mod admin;
pub mod admin_ui;
pub mod auth;
pub mod data;
pub mod models;
pub mod pages;
pub mod public_api;
pub mod responses;
pub mod router;
pub mod state;
pub mod templates;

pub use auth::AdminIdentity;
pub use models::{AdmissionRow, ContactRow, NewsRow};
pub use responses::{ErrorBody, json_error};
pub use state::AppState;
pub use templates::{escape_html, render_footer};
