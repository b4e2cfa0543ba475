//! Authenticated HTTP client for the Pawship grooming API.
//!
//! This crate provides a typed client for the backend behind the Pawship
//! `/api` proxy: bearer-token attachment, a single transparent
//! refresh-and-retry on 401, and typed wrappers for the auth, users,
//! options and stores endpoints.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pawship_client::{ApiClient, FileTokenStore, GetUsersParams, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:3000")
//!     .token_store(Arc::new(FileTokenStore::new("/tmp/pawship".as_ref())))
//!     .build()?;
//!
//! // Log in and persist the session
//! let tokens = client.auth().login("admin@pawship.id", "secret").await?;
//! client.store_tokens(&tokens);
//!
//! // Authenticated calls refresh the session once if the access token expired
//! let users = client
//!     .users()
//!     .list(&GetUsersParams { page: 1, limit: 10, ..Default::default() })
//!     .await?;
//! println!("{} users", users.pagination.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Token lifecycle
//!
//! Tokens live in a [`TokenStore`]. They are written by
//! [`ApiClient::store_tokens`] after login and by the client itself after a
//! successful refresh, and cleared by [`AuthApi::logout`] or when a refresh
//! fails ([`Error::SessionExpired`]).

pub mod api;
pub mod client;
pub mod error;
pub mod request;
pub mod token_store;
pub mod types;

pub use api::{AuthApi, OptionsApi, StoresApi, UsersApi};
pub use client::{API_BASE_PATH, ApiClient, ClientBuilder, REFRESH_PATH};
pub use error::{Error, ErrorMessage, Result, SESSION_EXPIRED_MESSAGE};
pub use request::{ApiRequest, MultipartForm, RequestBody};
pub use token_store::{
    ACCESS_TOKEN_STORAGE_KEY, FileTokenStore, MemoryTokenStore, NullTokenStore,
    REFRESH_TOKEN_STORAGE_KEY, SharedTokenStore, TokenStore,
};
pub use types::*;

pub use reqwest::Method;
