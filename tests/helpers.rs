use std::time::Duration;

use axum::Router;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use eatsmartdaily::{
    app_state::AppState,
    auth::jwt::JwtService,
    config::Config,
    entities::{CommentStatus, Role},
    routes,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_app(pool: Pool<Postgres>) -> Router {
    let config = Config::default();
    let mut state = AppState::new(pool, &config).expect("Failed to build app state");
    state.jwt = std::sync::Arc::new(JwtService::new(TEST_SECRET));
    state.link_checker = eatsmartdaily::links::LinkChecker::new(Duration::from_secs(2), 2)
        .expect("Failed to build link checker");
    routes::router(state)
}

pub fn bearer(role: Role) -> String {
    let token = JwtService::new(TEST_SECRET)
        .generate_token(Uuid::new_v4(), role)
        .expect("Failed to generate token");
    format!("Bearer {}", token)
}

pub async fn insert_comment(pool: &Pool<Postgres>, status: CommentStatus) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO comments (post_id, author_name, author_email, body, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Reader")
    .bind("reader@example.com")
    .bind("Loved the overnight oats recipe!")
    .bind(status)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test comment")
}
