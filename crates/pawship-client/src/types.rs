//! Request and response types for the Pawship API.
//!
//! These types mirror the backend's API contract.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Common
// ─────────────────────────────────────────────────────────────────────────────

/// Response carrying only a status message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Fields for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// A validated token pair returned by login or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    #[serde(default)]
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiRole {
    Admin,
    Ops,
    Groomer,
    Customer,
}

impl ApiRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiRole::Admin => "admin",
            ApiRole::Ops => "ops",
            ApiRole::Groomer => "groomer",
            ApiRole::Customer => "customer",
        }
    }
}

impl std::str::FromStr for ApiRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(ApiRole::Admin),
            "ops" => Ok(ApiRole::Ops),
            "groomer" => Ok(ApiRole::Groomer),
            "customer" => Ok(ApiRole::Customer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: ApiRole,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Response from `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub message: String,
    pub users: Vec<ApiUser>,
    pub pagination: Pagination,
}

/// Query for listing users.
#[derive(Debug, Clone, Default)]
pub struct GetUsersParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub role: Option<ApiRole>,
    pub is_active: Option<bool>,
}

/// Body for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserPayload {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub role: ApiRole,
    pub is_active: bool,
}

/// Body for `PUT /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserPayload {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: ApiRole,
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Category of a configurable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryOption {
    #[serde(rename = "feather category")]
    Feather,
    #[serde(rename = "size category")]
    Size,
    #[serde(rename = "breed category")]
    Breed,
    #[serde(rename = "member category")]
    Member,
    #[serde(rename = "customer category")]
    Customer,
    #[serde(rename = "pet type")]
    PetType,
    #[serde(rename = "service type")]
    ServiceType,
}

impl CategoryOption {
    pub const ALL: [CategoryOption; 7] = [
        CategoryOption::Feather,
        CategoryOption::Size,
        CategoryOption::Breed,
        CategoryOption::Member,
        CategoryOption::Customer,
        CategoryOption::PetType,
        CategoryOption::ServiceType,
    ];

    /// Wire name, as used in bodies and the `category` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryOption::Feather => "feather category",
            CategoryOption::Size => "size category",
            CategoryOption::Breed => "breed category",
            CategoryOption::Member => "member category",
            CategoryOption::Customer => "customer category",
            CategoryOption::PetType => "pet type",
            CategoryOption::ServiceType => "service type",
        }
    }
}

impl std::str::FromStr for CategoryOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryOption::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown option category '{}'", s))
    }
}

/// A configurable option (breed, size, service type, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category_options: CategoryOption,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Response from `GET /options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    #[serde(default)]
    pub message: String,
    pub options: Vec<ApiOption>,
}

/// Body for creating or updating an option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionPayload {
    pub name: String,
    pub category_options: CategoryOption,
    pub is_active: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Stores
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreOperational {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_days: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Daily booking capacity. The backend sends `null` for unset limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreCapacity {
    #[serde(default)]
    pub default_daily_capacity_minutes: Option<u32>,
    #[serde(default)]
    pub overbooking_limit_minutes: Option<u32>,
}

/// A grooming store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStore {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<StoreLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<StoreContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational: Option<StoreOperational>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<StoreCapacity>,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Response from `GET /stores`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresResponse {
    #[serde(default)]
    pub message: String,
    pub stores: Vec<ApiStore>,
    pub pagination: Pagination,
}

/// Response from `GET /stores/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetailResponse {
    #[serde(default)]
    pub message: String,
    pub store: ApiStore,
}

/// Query for listing stores.
#[derive(Debug, Clone, Default)]
pub struct GetStoresParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub city: Option<String>,
    pub province: Option<String>,
}

/// Capacity block of a store payload; both limits are required on write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreCapacityPayload {
    pub default_daily_capacity_minutes: u32,
    pub overbooking_limit_minutes: u32,
}

/// Body for creating or updating a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePayload {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub location: StoreLocation,
    pub contact: StoreContact,
    pub operational: StoreOperational,
    pub capacity: StoreCapacityPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_deserialize() {
        let user: ApiUser = serde_json::from_value(json!({
            "_id": "u1",
            "username": "rani",
            "email": "rani@pawship.id",
            "phone_number": "0812",
            "role": "groomer",
            "is_active": true,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, ApiRole::Groomer);
    }

    #[test]
    fn test_category_wire_names() {
        let value = serde_json::to_value(CategoryOption::PetType).unwrap();
        assert_eq!(value, json!("pet type"));
        for category in CategoryOption::ALL {
            let parsed: CategoryOption = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("unknown".parse::<CategoryOption>().is_err());
    }

    #[test]
    fn test_store_null_capacity() {
        let store: ApiStore = serde_json::from_value(json!({
            "_id": "s1",
            "code": "JKT-01",
            "name": "Pawship Kemang",
            "capacity": {"default_daily_capacity_minutes": null, "overbooking_limit_minutes": 30},
            "is_active": true,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        let capacity = store.capacity.unwrap();
        assert_eq!(capacity.default_daily_capacity_minutes, None);
        assert_eq!(capacity.overbooking_limit_minutes, Some(30));
        assert!(store.location.is_none());
    }

    #[test]
    fn test_pagination_rename() {
        let pagination: Pagination =
            serde_json::from_value(json!({"total": 41, "page": 2, "limit": 20, "totalPages": 3}))
                .unwrap();
        assert_eq!(pagination.total_pages, 3);
    }
}
