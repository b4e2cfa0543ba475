//! Access/refresh token persistence.
//!
//! The [`TokenStore`] trait is the only place tokens are read or written.
//! All operations are total: storage problems are logged and treated as an
//! absent token (reads) or a no-op (writes).

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Storage key for the access token.
pub const ACCESS_TOKEN_STORAGE_KEY: &str = "pawship-access-token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_STORAGE_KEY: &str = "pawship-refresh-token";

/// Default token file name within the pawship config directory.
pub const TOKEN_FILE: &str = "tokens.json";

// ============================================================================
// TokenStore Trait
// ============================================================================

/// Holds the current access/refresh token pair.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Current access token, if one is stored.
    fn get_access_token(&self) -> Option<String>;

    /// Current refresh token, if one is stored.
    fn get_refresh_token(&self) -> Option<String>;

    /// Overwrite the access token.
    fn set_access_token(&self, token: &str);

    /// Overwrite the refresh token.
    fn set_refresh_token(&self, token: &str);

    /// Overwrite both tokens.
    ///
    /// The default composes the two setters and is not atomic across keys.
    fn set_auth_tokens(&self, access_token: &str, refresh_token: &str) {
        self.set_access_token(access_token);
        self.set_refresh_token(refresh_token);
    }

    /// Remove both tokens.
    fn clear_auth_tokens(&self);
}

/// Shared token store for use across async contexts.
pub type SharedTokenStore = Arc<dyn TokenStore>;

// ============================================================================
// MemoryTokenStore
// ============================================================================

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<BTreeMap<&'static str, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token pair.
    pub fn with_tokens(access_token: &str, refresh_token: &str) -> Self {
        let store = Self::new();
        store.set_auth_tokens(access_token, refresh_token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_access_token(&self) -> Option<String> {
        self.entries.read().get(ACCESS_TOKEN_STORAGE_KEY).cloned()
    }

    fn get_refresh_token(&self) -> Option<String> {
        self.entries.read().get(REFRESH_TOKEN_STORAGE_KEY).cloned()
    }

    fn set_access_token(&self, token: &str) {
        self.entries
            .write()
            .insert(ACCESS_TOKEN_STORAGE_KEY, token.to_string());
    }

    fn set_refresh_token(&self, token: &str) {
        self.entries
            .write()
            .insert(REFRESH_TOKEN_STORAGE_KEY, token.to_string());
    }

    fn set_auth_tokens(&self, access_token: &str, refresh_token: &str) {
        let mut entries = self.entries.write();
        entries.insert(ACCESS_TOKEN_STORAGE_KEY, access_token.to_string());
        entries.insert(REFRESH_TOKEN_STORAGE_KEY, refresh_token.to_string());
    }

    fn clear_auth_tokens(&self) {
        let mut entries = self.entries.write();
        entries.remove(ACCESS_TOKEN_STORAGE_KEY);
        entries.remove(REFRESH_TOKEN_STORAGE_KEY);
    }
}

// ============================================================================
// FileTokenStore
// ============================================================================

/// Token store persisted as a JSON object keyed by the storage keys.
///
/// The file is re-read on every access so separate processes (the CLI run
/// twice, say) observe each other's writes.
#[derive(Debug)]
pub struct FileTokenStore {
    token_path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store at `<data_dir>/tokens.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(TOKEN_FILE))
    }

    /// Create with a custom token path.
    pub fn with_path(token_path: PathBuf) -> Self {
        Self {
            token_path,
            lock: Mutex::new(()),
        }
    }

    /// Get the token file path.
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.token_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.token_path.display(), error = %e, "Failed to read token file");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.token_path.display(), error = %e, "Ignoring malformed token file");
            BTreeMap::new()
        })
    }

    /// Replace the file contents via a temp file and rename, so readers never
    /// observe a half-written pair.
    fn write_entries(&self, entries: &BTreeMap<String, String>) {
        if let Err(e) = self.try_write_entries(entries) {
            tracing::warn!(path = %self.token_path.display(), error = %e, "Failed to write token file");
        }
    }

    fn try_write_entries(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.token_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(std::io::Error::other)?;
        let tmp_path = self.token_path.with_extension("json.tmp");
        let mut file = owner_only_file(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp_path, &self.token_path)
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries();
        apply(&mut entries);
        self.write_entries(&entries);
    }

    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        self.read_entries().remove(key)
    }
}

/// Open `path` for writing, readable by the owner only.
#[cfg(unix)]
fn owner_only_file(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // A leftover temp file keeps its old mode.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn owner_only_file(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl TokenStore for FileTokenStore {
    fn get_access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_STORAGE_KEY)
    }

    fn get_refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_STORAGE_KEY)
    }

    fn set_access_token(&self, token: &str) {
        self.update(|entries| {
            entries.insert(ACCESS_TOKEN_STORAGE_KEY.to_string(), token.to_string());
        });
    }

    fn set_refresh_token(&self, token: &str) {
        self.update(|entries| {
            entries.insert(REFRESH_TOKEN_STORAGE_KEY.to_string(), token.to_string());
        });
    }

    fn set_auth_tokens(&self, access_token: &str, refresh_token: &str) {
        self.update(|entries| {
            entries.insert(ACCESS_TOKEN_STORAGE_KEY.to_string(), access_token.to_string());
            entries.insert(REFRESH_TOKEN_STORAGE_KEY.to_string(), refresh_token.to_string());
        });
        tracing::debug!(path = %self.token_path.display(), "Tokens saved");
    }

    fn clear_auth_tokens(&self) {
        let _guard = self.lock.lock();
        if !self.token_path.exists() {
            return;
        }
        let mut entries = self.read_entries();
        entries.remove(ACCESS_TOKEN_STORAGE_KEY);
        entries.remove(REFRESH_TOKEN_STORAGE_KEY);
        self.write_entries(&entries);
    }
}

// ============================================================================
// NullTokenStore
// ============================================================================

/// Store for contexts without persistent storage (server-side rendering,
/// the proxy process). Reads return `None`; writes are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTokenStore;

impl TokenStore for NullTokenStore {
    fn get_access_token(&self) -> Option<String> {
        None
    }

    fn get_refresh_token(&self) -> Option<String> {
        None
    }

    fn set_access_token(&self, _token: &str) {}

    fn set_refresh_token(&self, _token: &str) {}

    fn clear_auth_tokens(&self) {}
}

/// Create a shared file-based token store.
pub fn create_token_store(data_dir: &Path) -> SharedTokenStore {
    Arc::new(FileTokenStore::new(data_dir))
}

/// Create a shared in-memory token store.
pub fn create_memory_token_store() -> SharedTokenStore {
    Arc::new(MemoryTokenStore::new())
}
