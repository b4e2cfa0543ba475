//! API endpoint implementations.

mod auth;
mod options;
mod stores;
mod users;

pub use auth::AuthApi;
pub(crate) use auth::tokens_from_payload;
pub use options::OptionsApi;
pub use stores::StoresApi;
pub use users::UsersApi;

/// Append a query string to `path`, omitting the `?` when empty.
pub(crate) fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", path, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/options", &[]), "/options");
        assert_eq!(
            with_query("/options", &[("category", "pet type".to_string())]),
            "/options?category=pet+type"
        );
    }
}
