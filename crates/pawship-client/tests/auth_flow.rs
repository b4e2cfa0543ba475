//! Integration tests for the auth operations and the typed resource APIs.

use std::sync::Arc;

use pawship_client::{
    ApiClient, ApiRole, CategoryOption, FileTokenStore, GetStoresParams, GetUsersParams,
    MemoryTokenStore, RegisterRequest, TokenStore,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::builder()
        .base_url(server.uri())
        .token_store(store.clone())
        .build()
        .unwrap();
    (client, store)
}

fn user_json(id: &str, role: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "username": "rani",
        "email": "rani@pawship.id",
        "phone_number": "08123456789",
        "role": role,
        "is_active": true,
        "createdAt": "2025-01-01T00:00:00.000Z",
        "updatedAt": "2025-01-02T00:00:00.000Z"
    })
}

#[tokio::test]
async fn test_login_then_store_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "a@b.c", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login berhasil",
            "access_token": "AT1",
            "refresh_token": "RT1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    let tokens = client.auth().login("a@b.c", "pw").await.unwrap();
    assert_eq!(tokens.access_token, "AT1");
    assert_eq!(tokens.refresh_token, "RT1");
    assert_eq!(tokens.message, "Login berhasil");

    // Login alone does not persist anything
    assert!(!client.is_authenticated());

    client.store_tokens(&tokens);
    assert_eq!(store.get_access_token().as_deref(), Some("AT1"));
    assert_eq!(store.get_refresh_token().as_deref(), Some("RT1"));
    assert!(client.is_authenticated());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_missing_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "AT1"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.auth().login("a@b.c", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Token tidak ditemukan pada response login");
}

#[tokio::test]
async fn test_login_rejected_uses_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Email atau password salah"})),
        )
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.auth().login("a@b.c", "wrong").await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), "Email atau password salah");
}

#[tokio::test]
async fn test_refresh_returns_new_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refresh_token": "RT1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT2",
            "refresh_token": "RT2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    let tokens = client.auth().refresh("RT1").await.unwrap();
    assert_eq!(tokens.access_token, "AT2");
    assert_eq!(tokens.refresh_token, "RT2");
    // The caller decides whether to persist
    assert_eq!(store.get_access_token(), None);
}

#[tokio::test]
async fn test_refresh_missing_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"refresh_token": "RT2"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.auth().refresh("RT1").await.unwrap_err();
    assert_eq!(err.to_string(), "Token tidak ditemukan pada response refresh");
}

#[tokio::test]
async fn test_register_passes_message_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "username": "budi",
            "email": "budi@pawship.id",
            "phone_number": "0812",
            "password": "rahasia"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Registrasi berhasil"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    let response = client
        .auth()
        .register(&RegisterRequest {
            username: "budi".into(),
            email: "budi@pawship.id".into(),
            phone_number: "0812".into(),
            password: "rahasia".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.message, "Registrasi berhasil");
    assert_eq!(store.get_access_token(), None);
}

#[tokio::test]
async fn test_logout_clears_store() {
    let server = MockServer::start().await;
    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");

    client.auth().logout();
    assert!(!client.is_authenticated());
    assert_eq!(store.get_refresh_token(), None);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_users_list_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("role", "groomer"))
        .and(header("authorization", "Bearer AT1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "users": [user_json("u1", "groomer")],
            "pagination": {"total": 6, "page": 2, "limit": 5, "totalPages": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");

    let response = client
        .users()
        .list(&GetUsersParams {
            page: 2,
            limit: 5,
            role: Some(ApiRole::Groomer),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(response.users.len(), 1);
    assert_eq!(response.users[0].id, "u1");
    assert_eq!(response.users[0].role, ApiRole::Groomer);
    assert_eq!(response.pagination.total_pages, 2);
}

#[tokio::test]
async fn test_user_toggle_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/toggle-status/u1"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Status diperbarui"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");
    let response = client.users().toggle_status("u1", false).await.unwrap();
    assert_eq!(response.message, "Status diperbarui");
}

#[tokio::test]
async fn test_options_list_by_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/options"))
        .and(query_param("category", "breed category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "options": [{
                "_id": "o1",
                "name": "Poodle",
                "category_options": "breed category",
                "is_active": true,
                "createdAt": "2025-01-01T00:00:00.000Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");
    let response = client
        .options()
        .list(Some(CategoryOption::Breed))
        .await
        .unwrap();
    assert_eq!(response.options[0].name, "Poodle");
    assert_eq!(response.options[0].category_options, CategoryOption::Breed);
}

#[tokio::test]
async fn test_stores_delete_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/stores/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Store tidak ditemukan"})))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");
    let err = client.stores().delete("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Store tidak ditemukan");
}

#[tokio::test]
async fn test_user_delete_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/u1"))
        .and(header("authorization", "Bearer AT1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");
    let response = client.users().delete("u1").await.unwrap();
    assert_eq!(response.message, "");
}

#[tokio::test]
async fn test_store_status_plain_text_reply() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/stores/s1"))
        .and(body_json(json!({"is_active": true})))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");
    let response = client.stores().update_status("s1", true).await.unwrap();
    assert_eq!(response, Default::default());
}

#[tokio::test]
async fn test_stores_list_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stores"))
        .and(query_param("search", "kemang"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stores": [],
            "pagination": {"total": 0, "page": 1, "limit": 10, "totalPages": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    store.set_auth_tokens("AT1", "RT1");
    let response = client
        .stores()
        .list(&GetStoresParams {
            page: 1,
            limit: 10,
            search: Some("kemang".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(response.stores.is_empty());
}

#[tokio::test]
async fn test_refresh_persists_through_file_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("authorization", "Bearer AT2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [],
            "pagination": {"total": 0, "page": 1, "limit": 10, "totalPages": 0}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT2",
            "refresh_token": "RT2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileTokenStore::new(dir.path()));
    store.set_auth_tokens("expired", "RT1");

    let client = ApiClient::builder()
        .base_url(server.uri())
        .token_store(store)
        .build()
        .unwrap();
    client
        .users()
        .list(&GetUsersParams {
            page: 1,
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();

    // A fresh store over the same directory sees the rotated pair
    let reopened = FileTokenStore::new(dir.path());
    assert_eq!(reopened.get_access_token().as_deref(), Some("AT2"));
    assert_eq!(reopened.get_refresh_token().as_deref(), Some("RT2"));
}
