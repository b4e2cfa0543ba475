//! Stores API.

use crate::api::with_query;
use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::{
    GetStoresParams, MessageResponse, StoreDetailResponse, StorePayload, StoresResponse,
};

/// Stores API client. All calls are authenticated.
pub struct StoresApi {
    client: ApiClient,
}

impl StoresApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List stores, paginated and optionally filtered.
    pub async fn list(&self, params: &GetStoresParams) -> Result<StoresResponse> {
        self.client.get(&stores_path(params)).await
    }

    /// Get a store by ID.
    pub async fn get(&self, id: &str) -> Result<StoreDetailResponse> {
        self.client.get(&format!("/stores/{}", id)).await
    }

    /// Create a store.
    pub async fn create(&self, payload: &StorePayload) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::post("/stores").json(payload)?.auth(true))
            .await
    }

    /// Replace a store.
    pub async fn update(&self, id: &str, payload: &StorePayload) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::put(format!("/stores/{}", id)).json(payload)?.auth(true))
            .await
    }

    /// Delete a store.
    pub async fn delete(&self, id: &str) -> Result<MessageResponse> {
        self.client
            .send_message(ApiRequest::delete(format!("/stores/{}", id)).auth(true))
            .await
    }

    /// Activate or deactivate a store.
    pub async fn update_status(&self, id: &str, is_active: bool) -> Result<MessageResponse> {
        let request = ApiRequest::put(format!("/stores/{}", id))
            .json(&serde_json::json!({ "is_active": is_active }))?;
        self.client.send_message(request.auth(true)).await
    }
}

fn stores_path(params: &GetStoresParams) -> String {
    let mut query = vec![
        ("page", params.page.to_string()),
        ("limit", params.limit.to_string()),
    ];
    let optional = [
        ("search", params.search.clone()),
        ("is_active", params.is_active.map(|b| b.to_string())),
        ("city", params.city.clone()),
        ("province", params.province.clone()),
    ];
    for (key, value) in optional {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            query.push((key, value));
        }
    }
    with_query("/stores", &query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_path() {
        let params = GetStoresParams {
            page: 1,
            limit: 5,
            city: Some("Jakarta Selatan".to_string()),
            is_active: Some(true),
            ..Default::default()
        };
        assert_eq!(
            stores_path(&params),
            "/stores?page=1&limit=5&is_active=true&city=Jakarta+Selatan"
        );
    }
}
