use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::web::{
    AppState, ErrorBody, NewsRow, data, json_error,
    responses::{SuccessBody, server_error},
};

/// Decoded photo payloads above this are refused.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionForm {
    pub student_name: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub previous_school: Option<String>,
    pub class_applying: Option<String>,
    pub blood_group: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug)]
pub struct AdmissionInsert {
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
}

#[derive(Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionAccepted {
    pub success: bool,
    pub admission_id: i64,
}

pub async fn list_news(
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsRow>>, (StatusCode, Json<ErrorBody>)> {
    let news = data::fetch_public_news(state.pool_ref())
        .await
        .map_err(|err| {
            error!(?err, "failed to load public news");
            server_error()
        })?;
    Ok(Json(news))
}

pub async fn submit_admission(
    State(state): State<AppState>,
    Json(form): Json<AdmissionForm>,
) -> Result<Json<AdmissionAccepted>, (StatusCode, Json<ErrorBody>)> {
    let record =
        validate_admission(form).map_err(|msg| json_error(StatusCode::BAD_REQUEST, msg))?;

    let admission_id: i64 = sqlx::query_scalar(
        "INSERT INTO admission_applications \
         (student_name, father_name, mother_name, dob, gender, email, phone, address, \
          previous_school, class_applying, blood_group, photo) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING id",
    )
    .bind(&record.student_name)
    .bind(&record.father_name)
    .bind(&record.mother_name)
    .bind(record.dob)
    .bind(&record.gender)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.address)
    .bind(&record.previous_school)
    .bind(&record.class_applying)
    .bind(&record.blood_group)
    .bind(&record.photo)
    .fetch_one(state.pool_ref())
    .await
    .map_err(|err| {
        error!(?err, "failed to store admission application");
        server_error()
    })?;

    Ok(Json(AdmissionAccepted {
        success: true,
        admission_id,
    }))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    let record = validate_contact(form).map_err(|msg| json_error(StatusCode::BAD_REQUEST, msg))?;

    sqlx::query(
        "INSERT INTO contact_messages (name, email, phone, subject, message) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.subject)
    .bind(&record.message)
    .execute(state.pool_ref())
    .await
    .map_err(|err| {
        error!(?err, "failed to store contact message");
        server_error()
    })?;

    Ok(Json(SuccessBody::ok()))
}

pub async fn public_stats(
    State(state): State<AppState>,
) -> Result<Json<data::SiteStats>, (StatusCode, Json<ErrorBody>)> {
    let stats = data::fetch_stats(state.pool_ref()).await.map_err(|err| {
        error!(?err, "failed to load site stats");
        server_error()
    })?;
    Ok(Json(stats))
}

pub fn validate_admission(form: AdmissionForm) -> Result<AdmissionInsert, String> {
    let mut missing = Vec::new();

    let student_name = required(&form.student_name, "studentName", &mut missing);
    let father_name = required(&form.father_name, "fatherName", &mut missing);
    let mother_name = required(&form.mother_name, "motherName", &mut missing);
    let dob_raw = required(&form.dob, "dob", &mut missing);
    let gender = required(&form.gender, "gender", &mut missing);
    let email = required(&form.email, "email", &mut missing);
    let phone = required(&form.phone, "phone", &mut missing);
    let address = required(&form.address, "address", &mut missing);
    let class_applying = required(&form.class_applying, "classApplying", &mut missing);

    if !missing.is_empty() {
        return Err(format!("Missing required fields: {}", missing.join(", ")));
    }

    let dob = NaiveDate::parse_from_str(&dob_raw, "%Y-%m-%d")
        .map_err(|_| "Invalid date of birth, expected YYYY-MM-DD".to_string())?;

    let photo = match optional(&form.photo) {
        Some(photo) => Some(validate_photo(&photo)?),
        None => None,
    };

    Ok(AdmissionInsert {
        student_name,
        father_name,
        mother_name,
        dob,
        gender,
        email,
        phone,
        address,
        previous_school: optional(&form.previous_school),
        class_applying,
        blood_group: optional(&form.blood_group),
        photo,
    })
}

pub fn validate_contact(form: ContactForm) -> Result<ContactInsert, String> {
    let mut missing = Vec::new();

    let name = required(&form.name, "name", &mut missing);
    let email = required(&form.email, "email", &mut missing);
    let phone = required(&form.phone, "phone", &mut missing);
    let subject = required(&form.subject, "subject", &mut missing);
    let message = required(&form.message, "message", &mut missing);

    if !missing.is_empty() {
        return Err(format!("Missing required fields: {}", missing.join(", ")));
    }

    Ok(ContactInsert {
        name,
        email,
        phone,
        subject,
        message,
    })
}

/// Photos arrive as `data:image/...;base64,` URLs and are stored verbatim.
fn validate_photo(photo: &str) -> Result<String, String> {
    let rest = photo
        .strip_prefix("data:image/")
        .ok_or_else(|| "Photo must be an inline image data URL".to_string())?;
    let (_, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| "Photo must be base64-encoded".to_string())?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|_| "Photo is not valid base64 data".to_string())?;
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err("Photo exceeds the 2 MB limit".to_string());
    }

    Ok(photo.to_string())
}

fn required(value: &Option<String>, label: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(label);
            String::new()
        }
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_admission() -> AdmissionForm {
        AdmissionForm {
            student_name: Some("Asha Verma".into()),
            father_name: Some("Ravi Verma".into()),
            mother_name: Some("Meena Verma".into()),
            dob: Some("2014-06-01".into()),
            gender: Some("Female".into()),
            email: Some("asha@example.com".into()),
            phone: Some("9876543210".into()),
            address: Some("12 Lake Road".into()),
            previous_school: None,
            class_applying: Some("Class 5".into()),
            blood_group: Some("O+".into()),
            photo: None,
        }
    }

    #[test]
    fn accepts_complete_admission() {
        let record = validate_admission(full_admission()).expect("valid form");
        assert_eq!(record.student_name, "Asha Verma");
        assert_eq!(record.dob, NaiveDate::from_ymd_opt(2014, 6, 1).unwrap());
        assert_eq!(record.previous_school, None);
        assert_eq!(record.blood_group.as_deref(), Some("O+"));
    }

    #[test]
    fn names_every_missing_field() {
        let form = AdmissionForm {
            student_name: None,
            dob: Some("   ".into()),
            ..full_admission()
        };
        let err = validate_admission(form).expect_err("must fail");
        assert_eq!(err, "Missing required fields: studentName, dob");
    }

    #[test]
    fn rejects_malformed_dob() {
        let form = AdmissionForm {
            dob: Some("01/06/2014".into()),
            ..full_admission()
        };
        let err = validate_admission(form).expect_err("must fail");
        assert!(err.contains("date of birth"));
    }

    #[test]
    fn accepts_inline_photo_and_rejects_garbage() {
        let form = AdmissionForm {
            photo: Some("data:image/png;base64,aGVsbG8=".into()),
            ..full_admission()
        };
        assert!(validate_admission(form).is_ok());

        let form = AdmissionForm {
            photo: Some("http://example.com/photo.png".into()),
            ..full_admission()
        };
        assert!(validate_admission(form).is_err());

        let form = AdmissionForm {
            photo: Some("data:image/png;base64,not!!valid##".into()),
            ..full_admission()
        };
        assert!(validate_admission(form).is_err());
    }

    #[test]
    fn contact_requires_all_fields() {
        let err = validate_contact(ContactForm::default()).expect_err("must fail");
        assert_eq!(
            err,
            "Missing required fields: name, email, phone, subject, message"
        );

        let ok = validate_contact(ContactForm {
            name: Some("A".into()),
            email: Some("a@b.com".into()),
            phone: Some("123".into()),
            subject: Some("Hi".into()),
            message: Some("Has a \"quote\"".into()),
        })
        .expect("valid");
        assert_eq!(ok.message, "Has a \"quote\"");
    }
}
