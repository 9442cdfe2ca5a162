#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use concord_api::auth::jwt::{generate_access_token, JwtConfig};
use concord_api::config::ServerConfig;
use concord_api::router::build_app_router;
use concord_api::state::AppState;
use concord_db::models::member::{CreateMember, Member};
use concord_db::models::profile::{CreateProfile, Profile};
use concord_db::models::server::{CreateServer, Server};
use concord_db::repositories::{MemberRepo, ProfileRepo, ServerRepo};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the production router and middleware stack over `pool`.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a session token for `profile_id` that the test app accepts.
pub fn token_for(profile_id: i64) -> String {
    generate_access_token(profile_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// The canonical fixture: P1 owns S1 with M1 (P2, GUEST) and M2 (P1, ADMIN).
pub struct Fixture {
    pub owner: Profile,
    pub guest: Profile,
    pub server: Server,
    /// The guest's membership.
    pub m1: Member,
    /// The owner's own membership.
    pub m2: Member,
}

pub async fn create_profile(pool: &SqlitePool, user_id: &str) -> Profile {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            user_id: user_id.to_string(),
            name: format!("{user_id} name"),
            email: format!("{user_id}@test.com"),
            image_url: None,
        },
    )
    .await
    .expect("profile creation should succeed")
}

pub async fn join(pool: &SqlitePool, server_id: i64, profile_id: i64) -> Member {
    MemberRepo::create(
        pool,
        &CreateMember {
            profile_id,
            server_id,
            role: None,
        },
    )
    .await
    .expect("member creation should succeed")
}

pub async fn seed(pool: &SqlitePool) -> Fixture {
    let owner = create_profile(pool, "p1").await;
    let guest = create_profile(pool, "p2").await;
    let server = ServerRepo::create(
        pool,
        &CreateServer {
            name: "S1".to_string(),
            image_url: None,
            profile_id: owner.id,
        },
    )
    .await
    .expect("server creation should succeed");
    let m1 = join(pool, server.id, guest.id).await;

    let aggregate = ServerRepo::find_with_members(pool, server.id)
        .await
        .unwrap()
        .unwrap();
    let m2 = aggregate
        .member
        .into_iter()
        .map(|m| m.member)
        .find(|m| m.profile_id == owner.id)
        .expect("owner should be enrolled");

    Fixture {
        owner,
        guest,
        server,
        m1,
        m2,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a request through the app, optionally authenticated and with a JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
