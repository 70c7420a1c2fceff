//! Role gating over the HTTP surface

mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use common::{create_user, default_state};
use design_server::core::Server;
use design_server::db::models::{QuoteCreate, Role};
use design_server::db::repository::QuoteRepository;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Login through the API and return the bearer token
async fn login(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"username": username, "password": "contrasena-larga"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

/// Seed one pending quote, returning its id
async fn seed_quote(state: &design_server::core::ServerState) -> String {
    let repo = QuoteRepository::new(state.get_db());
    let quote = repo
        .create(QuoteCreate {
            user_id: None,
            project_id: None,
            details: shared::quote::QuoteDetails {
                tipo: "cocina".to_string(),
                datos: json!({"superficie": "12m2"}),
                image_url: None,
                descripcion: None,
                fecha_solicitud: None,
                comentarios: None,
            },
            total_cost: None,
        })
        .await
        .unwrap();
    quote.id.unwrap().to_string()
}

#[tokio::test]
async fn anonymous_transition_is_unauthorized() {
    let (state, _dir) = default_state().await;
    let quote_id = seed_quote(&state).await;
    let app = Server::build_router(state);

    let response = app
        .oneshot(
            Request::put(format!("/api/quotes/{quote_id}/status"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"status": "approved"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cliente_transition_is_forbidden_admin_succeeds() {
    let (state, _dir) = default_state().await;
    create_user(&state, "cliente1", Role::Cliente).await;
    create_user(&state, "admin1", Role::Admin).await;
    let quote_id = seed_quote(&state).await;
    let app = Server::build_router(state);

    // cliente -> 403
    let token = login(&app, "cliente1").await;
    let response = app
        .clone()
        .oneshot(
            Request::put(format!("/api/quotes/{quote_id}/status"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({"status": "approved"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // admin, same transition -> 200 and the status moved
    let token = login(&app, "admin1").await;
    let response = app
        .clone()
        .oneshot(
            Request::put(format!("/api/quotes/{quote_id}/status"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({"status": "approved"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "approved");
}

#[tokio::test]
async fn disenador_may_transition() {
    let (state, _dir) = default_state().await;
    create_user(&state, "paula", Role::Disenador).await;
    let quote_id = seed_quote(&state).await;
    let app = Server::build_router(state);

    let token = login(&app, "paula").await;
    let response = app
        .oneshot(
            Request::put(format!("/api/quotes/{quote_id}/status"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({"status": "rejected"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "rejected");
}

#[tokio::test]
async fn illegal_transition_is_unprocessable_over_http() {
    let (state, _dir) = default_state().await;
    create_user(&state, "admin2", Role::Admin).await;
    let quote_id = seed_quote(&state).await;
    let app = Server::build_router(state);

    let token = login(&app, "admin2").await;
    let response = app
        .oneshot(
            Request::put(format!("/api/quotes/{quote_id}/status"))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({"status": "completed"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn materials_read_is_public_listing_quotes_is_not() {
    let (state, _dir) = default_state().await;
    let app = Server::build_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/materials?category=cocina")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/api/quotes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_quote_creation_is_open() {
    let (state, _dir) = default_state().await;
    let app = Server::build_router(state);

    let response = app
        .oneshot(
            Request::post("/api/quotes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "details": {
                            "tipo": "ventana",
                            "datos": {"ancho": 90, "alto": 120}
                        }
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert!(body["user_id"].is_null());
}

#[tokio::test]
async fn authenticated_quote_creation_attaches_identity() {
    let (state, _dir) = default_state().await;
    create_user(&state, "nora", Role::Cliente).await;
    let app = Server::build_router(state);

    let token = login(&app, "nora").await;
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/quotes")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({
                        "details": {
                            "tipo": "gabinete",
                            "datos": {"modulos": 4}
                        },
                        "total_cost": 215000
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["user_id"].as_str().unwrap().starts_with("user:"));

    // And the owner sees it in their listing
    let response = app
        .oneshot(
            Request::get("/api/quotes?status=pending")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn contact_form_is_public_inbox_is_admin_only() {
    let (state, _dir) = default_state().await;
    create_user(&state, "cliente9", Role::Cliente).await;
    create_user(&state, "admin9", Role::Admin).await;
    let app = Server::build_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/messages")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Rita",
                        "email": "rita@example.com",
                        "message": "Quisiera renovar mi cocina",
                        "subscribed": true
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // cliente cannot read the inbox
    let token = login(&app, "cliente9").await;
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/messages")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // admin can, and sees the unread flag
    let token = login(&app, "admin9").await;
    let response = app
        .oneshot(
            Request::get("/api/messages")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let inbox = body_json(response).await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["is_read"], false);
}

#[tokio::test]
async fn estimate_endpoint_reports_ignored_materials() {
    let (state, _dir) = default_state().await;
    let app = Server::build_router(state);

    let response = app
        .oneshot(
            Request::post("/api/estimate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "project_type": "cocina",
                        "materials": ["herraje-inox-unknown"],
                        "size": "12m2"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ignored"][0], "herraje-inox-unknown");
    assert!(body["estimated_cost"]["min"].as_i64().unwrap() > 0);
}
