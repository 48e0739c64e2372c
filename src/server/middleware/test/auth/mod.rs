use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
    model::user::{Role, User},
    service::auth::jwt::JwtService,
};
use test_utils::{builder::TestBuilder, factory};

mod require;

const SECRET: &str = "middleware-test-secret";

fn jwt() -> JwtService {
    JwtService::new(SECRET, 1)
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

async fn load(db: &sea_orm::DatabaseConnection, id: i32) -> User {
    UserRepository::new(db).find_by_id(id).await.unwrap().unwrap()
}
