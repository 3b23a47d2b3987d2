/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Origin used to build shareable viewer links.
    pub public_origin: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Viewing sessions idle longer than this are torn down by the
    /// background sweeper.
    pub session_idle_secs: u64,
    /// Blob storage backend for uploaded card images.
    pub storage: StorageConfig,
}

/// Blob storage backend selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local {
        base_path: String,
        public_base_url: String,
    },
    S3 {
        bucket: String,
        public_base_url: String,
    },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                       |
    /// |---------------------------|-------------------------------|
    /// | `HOST`                    | `0.0.0.0`                     |
    /// | `PORT`                    | `3000`                        |
    /// | `PUBLIC_ORIGIN`           | `http://localhost:3000`       |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                          |
    /// | `SESSION_IDLE_SECS`       | `1800`                        |
    /// | `STORAGE_BACKEND`         | `local` (or `s3`)             |
    /// | `STORAGE_BASE_PATH`       | `./data/card-images` (local)  |
    /// | `STORAGE_BUCKET`          | `card-images` (s3)            |
    /// | `STORAGE_PUBLIC_BASE_URL` | derived for local, required for s3 |
    ///
    /// Misconfiguration panics at startup; we want it to fail fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let public_origin =
            std::env::var("PUBLIC_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_idle_secs: u64 = std::env::var("SESSION_IDLE_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("SESSION_IDLE_SECS must be a valid u64");

        let storage = Self::storage_from_env(&public_origin);

        Self {
            host,
            port,
            public_origin,
            cors_origins,
            request_timeout_secs,
            session_idle_secs,
            storage,
        }
    }

    /// Read and validate the storage backend configuration.
    fn storage_from_env(public_origin: &str) -> StorageConfig {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());

        match backend.as_str() {
            "local" => {
                let base_path = std::env::var("STORAGE_BASE_PATH")
                    .unwrap_or_else(|_| "./data/card-images".into());
                let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL").unwrap_or_else(
                    |_| format!("{}/card-images", public_origin.trim_end_matches('/')),
                );
                StorageConfig::Local {
                    base_path,
                    public_base_url,
                }
            }
            "s3" => {
                let bucket =
                    std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "card-images".into());
                let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
                    .expect("STORAGE_PUBLIC_BASE_URL must be set for the s3 backend");
                assert!(
                    !bucket.trim().is_empty(),
                    "STORAGE_BUCKET must be non-empty"
                );
                StorageConfig::S3 {
                    bucket,
                    public_base_url,
                }
            }
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"),
        }
    }
}
