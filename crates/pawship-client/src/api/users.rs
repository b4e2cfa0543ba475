//! Users API.

use crate::api::with_query;
use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::{
    CreateUserPayload, GetUsersParams, MessageResponse, UpdateUserPayload, UsersResponse,
};

/// Users API client. All calls are authenticated.
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List users, paginated and optionally filtered.
    pub async fn list(&self, params: &GetUsersParams) -> Result<UsersResponse> {
        self.client.get(&users_path(params)).await
    }

    /// Create a user.
    pub async fn create(&self, payload: &CreateUserPayload) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::post("/users").json(payload)?.auth(true))
            .await
    }

    /// Update a user's profile fields.
    pub async fn update(&self, id: &str, payload: &UpdateUserPayload) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::put(format!("/users/{}", id)).json(payload)?.auth(true))
            .await
    }

    /// Delete a user.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::delete(format!("/users/{}", id)).auth(true))
            .await
    }

    /// Activate or deactivate a user.
    pub async fn toggle_status(&self, id: &str, is_active: bool) -> Result<MessageResponse> {
        let request = ApiRequest::patch(format!("/users/toggle-status/{}", id))
            .json(&serde_json::json!({ "is_active": is_active }))?;
        self.client.send_message(request.auth(true)).await
    }

    /// Set a new password for a user.
    pub async fn update_password(&self, id: &str, password: &str) -> Result<MessageResponse> {
        let request = ApiRequest::patch(format!("/users/update-password/{}", id))
            .json(&serde_json::json!({ "password": password }))?;
        self.client.send_message(request.auth(true)).await
    }
}

fn users_path(params: &GetUsersParams) -> String {
    let mut query = vec![
        ("page", params.page.to_string()),
        ("limit", params.limit.to_string()),
    ];
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        query.push(("search", search.to_string()));
    }
    if let Some(role) = params.role {
        query.push(("role", role.as_str().to_string()));
    }
    if let Some(is_active) = params.is_active {
        query.push(("is_active", is_active.to_string()));
    }
    with_query("/users", &query)
}
