use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::error;

use crate::web::{
    AppState, ErrorBody, json_error,
    responses::{SuccessBody, server_error},
};

pub const TOKEN_TTL_HOURS: i64 = 24;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, sqlx::FromRow)]
pub struct AdminAuthRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Verified administrator identity carried by the bearer token.
#[derive(Clone)]
pub struct AdminIdentity {
    pub id: i64,
    pub email: String,
}

#[derive(Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminProfile {
    pub id: i64,
    pub email: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorBody>)> {
    let email = form.email.trim();

    let admin = match fetch_admin_by_email(state.pool_ref(), email).await {
        Ok(Some(admin)) => admin,
        Ok(None) => return Err(invalid_credentials()),
        Err(err) => {
            error!(?err, "failed to fetch administrator during login");
            return Err(server_error());
        }
    };

    if !verify_password(&form.password, &admin.password_hash) {
        return Err(invalid_credentials());
    }

    let token = mint_token(state.encoding_key(), admin.id, &admin.email).map_err(|err| {
        error!(?err, "failed to sign access token");
        server_error()
    })?;

    Ok(Json(LoginResponse {
        token,
        admin: AdminProfile {
            id: admin.id,
            email: admin.email,
        },
    }))
}

pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<ChangePasswordRequest>,
) -> Result<Json<SuccessBody>, (StatusCode, Json<ErrorBody>)> {
    let identity = require_admin(&state, &headers)?;

    if form.new_password.len() < MIN_PASSWORD_LEN {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    let admin = match fetch_admin_by_email(state.pool_ref(), &identity.email).await {
        Ok(Some(admin)) => admin,
        Ok(None) => return Err(invalid_credentials()),
        Err(err) => {
            error!(?err, "failed to fetch administrator for password change");
            return Err(server_error());
        }
    };

    if !verify_password(&form.current_password, &admin.password_hash) {
        return Err(invalid_credentials());
    }

    let password_hash = hash_password(&form.new_password).map_err(|err| {
        error!(%err, "failed to hash replacement password");
        server_error()
    })?;

    sqlx::query("UPDATE administrators SET password_hash = $2 WHERE id = $1")
        .bind(admin.id)
        .bind(password_hash)
        .execute(state.pool_ref())
        .await
        .map_err(|err| {
            error!(?err, "failed to store replacement password");
            server_error()
        })?;

    Ok(Json(SuccessBody::ok()))
}

/// Gate for admin-scoped handlers. Verification is stateless: signature plus
/// expiry, no revocation list.
pub fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AdminIdentity, (StatusCode, Json<ErrorBody>)> {
    let token = bearer_token(headers)
        .ok_or_else(|| json_error(StatusCode::UNAUTHORIZED, "Missing token"))?;

    let claims = verify_token(state.decoding_key(), token)
        .map_err(|_| json_error(StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

    Ok(AdminIdentity {
        id: claims.sub,
        email: claims.email,
    })
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub fn mint_token(
    key: &EncodingKey,
    admin_id: i64,
    email: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + ChronoDuration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    encode(&Header::default(), &claims, key)
}

pub fn verify_token(
    key: &DecodingKey,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, key, &Validation::default()).map(|data| data.claims)
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn fetch_admin_by_email(
    pool: &PgPool,
    email: &str,
) -> sqlx::Result<Option<AdminAuthRow>> {
    sqlx::query_as::<_, AdminAuthRow>(
        "SELECT id, email, password_hash FROM administrators WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

fn invalid_credentials() -> (StatusCode, Json<ErrorBody>) {
    json_error(StatusCode::UNAUTHORIZED, "Invalid credentials")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn test_keys() -> (EncodingKey, DecodingKey) {
        let secret = b"unit-test-secret-at-least-32-bytes!!";
        (
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("correct horse battery").expect("hash");
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let (enc, dec) = test_keys();
        let token = mint_token(&enc, 7, "head@school.local").expect("mint");

        let claims = verify_token(&dec, &token).expect("verify");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "head@school.local");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let (enc, dec) = test_keys();
        let token = mint_token(&enc, 1, "admin@school.local").expect("mint");

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(verify_token(&dec, &tampered).is_err());
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let (enc, _) = test_keys();
        let other = DecodingKey::from_secret(b"a-completely-different-secret-key");
        let token = mint_token(&enc, 1, "admin@school.local").expect("mint");

        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let (enc, dec) = test_keys();
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            email: "admin@school.local".to_string(),
            iat: (now - ChronoDuration::hours(25)).timestamp(),
            exp: (now - ChronoDuration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &enc).expect("encode");

        assert!(verify_token(&dec, &token).is_err());
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc"));
        assert!(bearer_token(&headers).is_none());

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc"),
        );
        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
