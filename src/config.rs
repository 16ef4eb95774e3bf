use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoConfig {
    pub ip_api_base: String,
    pub nominatim_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: Option<AuthConfig>,
    pub geo: GeoConfig,
}

impl AppConfig {
    /// Bearer token required on /api routes, if any is configured.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth.as_ref().and_then(|a| a.token.as_deref()).filter(|t| !t.is_empty())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        // Optional local file: warenlager.toml (in CWD)
        .add_source(::config::File::with_name("warenlager").required(false));

    if let Ok(custom_path) = std::env::var("WARENLAGER_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("WARENLAGER").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    // Warn for privileged ports on Unix-like systems
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Database pool bounds
    if cfg.database.max_connections == 0 {
        return Err(anyhow::anyhow!("database.max_connections must be > 0"));
    }
    if cfg.database.min_connections > cfg.database.max_connections {
        return Err(anyhow::anyhow!(
            "database.min_connections ({}) must not exceed database.max_connections ({})",
            cfg.database.min_connections,
            cfg.database.max_connections
        ));
    }
    if cfg.database.max_lifetime_secs == 0 {
        return Err(anyhow::anyhow!("database.max_lifetime_secs must be > 0"));
    }

    // Geo service endpoints
    for (field, value) in
        [("geo.ip_api_base", &cfg.geo.ip_api_base), ("geo.nominatim_base", &cfg.geo.nominatim_base)]
    {
        if value.is_empty() {
            return Err(anyhow::anyhow!("{} must not be empty", field));
        }
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(anyhow::anyhow!("{} must be an http(s) URL, got {}", field, value));
        }
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
