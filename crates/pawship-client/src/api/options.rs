//! Options API.

use crate::api::with_query;
use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::{CategoryOption, MessageResponse, OptionPayload, OptionsResponse};

/// Options API client. All calls are authenticated.
pub struct OptionsApi {
    client: ApiClient,
}

impl OptionsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List options, optionally restricted to one category.
    pub async fn list(&self, category: Option<CategoryOption>) -> Result<OptionsResponse> {
        let query: Vec<(&str, String)> = category
            .map(|c| vec![("category", c.as_str().to_string())])
            .unwrap_or_default();
        self.client.get(&with_query("/options", &query)).await
    }

    /// Create an option.
    pub async fn create(&self, payload: &OptionPayload) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::post("/options").json(payload)?.auth(true))
            .await
    }

    /// Replace an option.
    pub async fn update(&self, id: &str, payload: &OptionPayload) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::put(format!("/options/{}", id)).json(payload)?.auth(true))
            .await
    }

    /// Delete an option.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::delete(format!("/options/{}", id)).auth(true))
            .await
    }

    /// Activate or deactivate an option.
    pub async fn toggle_status(&self, id: &str, is_active: bool) -> Result<MessageResponse> {
        let request = ApiRequest::put(format!("/options/{}", id))
            .json(&serde_json::json!({ "is_active": is_active }))?;
        self.client.send_message(request.auth(true)).await
    }
}
