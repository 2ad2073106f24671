use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins. A lone `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of the precompiled frontend bundle.
    pub frontend_dir: PathBuf,
    /// Document served with 404 when no asset matches. Relative to
    /// `frontend_dir`; empty disables it.
    pub not_found_document: Option<String>,
    /// Where uploaded PDFs are stored.
    pub upload_dir: PathBuf,
    /// Table-extraction command line; the file path is appended.
    pub pdf_extractor_cmd: String,
    pub pdf_extractor_timeout_secs: u64,
    /// Upper bound on pooled database connections (default: `20`).
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default            |
    /// |------------------------------|--------------------|
    /// | `HOST`                       | `0.0.0.0`          |
    /// | `PORT`                       | `3000`             |
    /// | `CORS_ORIGINS`               | `*`                |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`               |
    /// | `FRONTEND_DIR`               | `../frontend/out`  |
    /// | `NOT_FOUND_DOCUMENT`         | `404.html`         |
    /// | `UPLOAD_DIR`                 | `uploads`          |
    /// | `PDF_EXTRACTOR_CMD`          | `pdf-table2json`   |
    /// | `PDF_EXTRACTOR_TIMEOUT_SECS` | `120`              |
    /// | `DB_MAX_CONNECTIONS`         | `20`               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let frontend_dir: PathBuf = std::env::var("FRONTEND_DIR")
            .unwrap_or_else(|_| "../frontend/out".into())
            .into();

        let not_found_document = match std::env::var("NOT_FOUND_DOCUMENT") {
            Ok(doc) if doc.trim().is_empty() => None,
            Ok(doc) => Some(doc),
            Err(_) => Some(harbor_core::static_site::DEFAULT_NOT_FOUND_DOCUMENT.to_string()),
        };

        let upload_dir: PathBuf = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".into())
            .into();

        let pdf_extractor_cmd =
            std::env::var("PDF_EXTRACTOR_CMD").unwrap_or_else(|_| "pdf-table2json".into());

        let pdf_extractor_timeout_secs: u64 = std::env::var("PDF_EXTRACTOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("PDF_EXTRACTOR_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            frontend_dir,
            not_found_document,
            upload_dir,
            pdf_extractor_cmd,
            pdf_extractor_timeout_secs,
            db_max_connections,
        }
    }

    /// True when CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
