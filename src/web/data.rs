use serde::Serialize;
use sqlx::PgPool;

use super::models::{AdmissionRow, ContactRow, NewsRow};

pub const PUBLIC_NEWS_LIMIT: i64 = 10;

const ADMISSION_COLUMNS: &str = "id, student_name, father_name, mother_name, dob, gender, email, \
     phone, address, previous_school, class_applying, blood_group, photo, submitted_at";

pub async fn fetch_public_news(pool: &PgPool) -> sqlx::Result<Vec<NewsRow>> {
    sqlx::query_as::<_, NewsRow>(
        "SELECT id, title, content, date, created_at FROM news_items ORDER BY date DESC LIMIT $1",
    )
    .bind(PUBLIC_NEWS_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn fetch_all_news(pool: &PgPool) -> sqlx::Result<Vec<NewsRow>> {
    sqlx::query_as::<_, NewsRow>(
        "SELECT id, title, content, date, created_at FROM news_items ORDER BY date DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_admissions(pool: &PgPool) -> sqlx::Result<Vec<AdmissionRow>> {
    sqlx::query_as::<_, AdmissionRow>(&format!(
        "SELECT {ADMISSION_COLUMNS} FROM admission_applications ORDER BY submitted_at DESC",
    ))
    .fetch_all(pool)
    .await
}

pub async fn fetch_admission(pool: &PgPool, id: i64) -> sqlx::Result<Option<AdmissionRow>> {
    sqlx::query_as::<_, AdmissionRow>(&format!(
        "SELECT {ADMISSION_COLUMNS} FROM admission_applications WHERE id = $1",
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_contacts(pool: &PgPool) -> sqlx::Result<Vec<ContactRow>> {
    sqlx::query_as::<_, ContactRow>(
        "SELECT id, name, email, phone, subject, message, submitted_at \
         FROM contact_messages ORDER BY submitted_at DESC",
    )
    .fetch_all(pool)
    .await
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_admissions: i64,
    pub total_contacts: i64,
    pub total_news: i64,
    pub recent_admissions: i64,
}

/// Counts for the dashboard header; "recent" means the trailing 7 days.
pub async fn fetch_stats(pool: &PgPool) -> sqlx::Result<SiteStats> {
    let total_admissions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admission_applications")
        .fetch_one(pool)
        .await?;
    let total_contacts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(pool)
        .await?;
    let total_news: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news_items")
        .fetch_one(pool)
        .await?;
    let recent_admissions: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM admission_applications WHERE submitted_at > NOW() - INTERVAL '7 days'",
    )
    .fetch_one(pool)
    .await?;

    Ok(SiteStats {
        total_admissions,
        total_contacts,
        total_news,
        recent_admissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_with_camel_case_keys() {
        let stats = SiteStats {
            total_admissions: 12,
            total_contacts: 4,
            total_news: 3,
            recent_admissions: 2,
        };

        let value = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(value["totalAdmissions"], 12);
        assert_eq!(value["totalContacts"], 4);
        assert_eq!(value["totalNews"], 3);
        assert_eq!(value["recentAdmissions"], 2);
    }
}
