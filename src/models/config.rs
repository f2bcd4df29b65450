use serde::Deserialize;

/// Configuration options for the Aquastore server, loaded from
/// `config.yaml` with `AQUASTORE_`-prefixed environment overrides.
#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Address the HTTP server binds to, e.g. `127.0.0.1`.
    pub bind_address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    pub asset_store: AssetStoreConfig,
}

/// Connection settings for the external asset store.
#[derive(Clone, Deserialize)]
pub struct AssetStoreConfig {
    /// Base upload endpoint; uploads POST raw bytes to
    /// `{base_url}?uploadType=media&name=...`.
    pub base_url: String,
    /// Per-upload timeout in seconds.
    pub timeout_secs: u64,
}
