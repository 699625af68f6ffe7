#![allow(dead_code)]

use jsonwebtoken::Algorithm;
use shorturl::application::services::{AuthService, LinkService};
use shorturl::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use shorturl::infrastructure::security::JwtCodec;
use shorturl::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_codec() -> JwtCodec {
    JwtCodec::new(TEST_SECRET, Algorithm::HS256, 30)
}

pub async fn create_test_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, hashed_password) VALUES ($1, 'x') RETURNING id")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str, user_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (original_url, short_url, user_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_link(pool: &PgPool, code: &str, url: &str, user_id: i64) {
    sqlx::query(
        "INSERT INTO urls (original_url, short_url, user_id, is_active) VALUES ($1, $2, $3, FALSE)",
    )
    .bind(url)
    .bind(code)
    .bind(user_id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn clicks_of(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM urls WHERE short_url = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    let link_service = Arc::new(LinkService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        6,
        5,
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(PgUserRepository::new(pool)),
        test_codec(),
    ));

    AppState::new(link_service, auth_service)
}
