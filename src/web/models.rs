use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Clone, FromRow, Serialize)]
pub struct NewsRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, FromRow, Serialize)]
pub struct AdmissionRow {
    pub id: i64,
    pub student_name: String,
    pub father_name: String,
    pub mother_name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub previous_school: Option<String>,
    pub class_applying: String,
    pub blood_group: Option<String>,
    pub photo: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, FromRow, Serialize)]
pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}
