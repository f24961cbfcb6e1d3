use crate::{
    auth::jwt::JwtService,
    config::Config,
    links::LinkChecker,
    repositories::{CommentRepository, CommentStore},
};
use axum::extract::FromRef;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub comment_store: Arc<dyn CommentStore>,
    pub link_checker: LinkChecker,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>, config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            comment_store: Arc::new(CommentRepository::new(pool)),
            link_checker: LinkChecker::from_config(config)?,
            jwt: Arc::new(JwtService::new(config.jwt_secret())),
        })
    }
}

impl FromRef<AppState> for Arc<JwtService> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
