use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

/// Primary document store. An unreachable or empty URL is not an error here:
/// the startup probe downgrades to the in-memory store instead.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: String::new(), probe_timeout_secs: default_probe_timeout(), sqlx_logging: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_assets_root")]
    pub root: String,
    /// Base URL under which `/static/...` is reachable from outside.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { root: default_assets_root(), public_base_url: default_public_base_url() }
    }
}

fn default_probe_timeout() -> u64 { 3 }
fn default_assets_root() -> String { "static".to_string() }
fn default_public_base_url() -> String { "http://localhost:5000".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load config.toml if present, otherwise defaults; then normalize.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.assets.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from `DATABASE_URL` when the TOML leaves it empty.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if self.probe_timeout_secs == 0 {
            self.probe_timeout_secs = default_probe_timeout();
        }
    }
}

impl AssetsConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.root.trim().is_empty() {
            self.root = default_assets_root();
        }
        if self.public_base_url.trim().is_empty() {
            self.public_base_url = default_public_base_url();
        }
        let lower = self.public_base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("assets.public_base_url must start with http:// or https://"));
        }
        // Resolved URLs are joined with a path of their own.
        while self.public_base_url.ends_with('/') {
            self.public_base_url.pop();
        }
        Ok(())
    }
}
