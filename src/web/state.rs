use std::env;

use anyhow::{Context, Result, anyhow};
use jsonwebtoken::{DecodingKey, EncodingKey};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

pub const SEED_ADMIN_EMAIL: &str = "admin@school.local";
pub const SEED_ADMIN_PASSWORD: &str = "change-me";

#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL env var is missing")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET env var is missing")?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&database_url)
            .await
            .context("failed to connect to Postgres")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;

        Ok(Self {
            pool,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        })
    }

    /// Insert the bootstrap administrator when the table is empty.
    pub async fn ensure_seed_admin(&self) -> Result<()> {
        let has_admin: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM administrators)")
            .fetch_one(&self.pool)
            .await
            .context("failed to verify administrator presence")?;

        if !has_admin {
            let password_hash = crate::web::auth::hash_password(SEED_ADMIN_PASSWORD)
                .map_err(|err| anyhow!("failed to hash seed admin password: {err}"))?;

            sqlx::query(
                "INSERT INTO administrators (email, password_hash, display_name) VALUES ($1, $2, $3)",
            )
            .bind(SEED_ADMIN_EMAIL)
            .bind(password_hash)
            .bind("Administrator")
            .execute(&self.pool)
            .await
            .context("failed to insert seed administrator")?;

            info!(
                "Seeded administrator '{}' (password: '{}'). Update it promptly.",
                SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD
            );
        }

        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub fn pool_ref(&self) -> &PgPool {
        &self.pool
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
