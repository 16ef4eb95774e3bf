use crate::config::{self, AppConfig, AuthConfig};

#[test]
fn test_default_config_loads_embedded_toml() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.port, 8080);
    assert!(cfg.database.url.starts_with("sqlite://"));
    assert_eq!(cfg.database.max_connections, 10);
    assert_eq!(cfg.database.min_connections, 5);
    assert_eq!(cfg.database.max_lifetime_secs, 300);
    assert!(cfg.geo.ip_api_base.starts_with("http"));
    assert!(cfg.geo.nominatim_base.starts_with("https"));
}

#[test]
fn test_default_config_passes_validation() {
    let cfg = AppConfig::default();
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut cfg = AppConfig::default();
    cfg.server.port = 0;
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn test_validate_rejects_bad_pool_bounds() {
    let mut cfg = AppConfig::default();
    cfg.database.max_connections = 0;
    assert!(config::validate(&cfg).is_err());

    let mut cfg = AppConfig::default();
    cfg.database.min_connections = 20;
    cfg.database.max_connections = 10;
    assert!(config::validate(&cfg).is_err());

    let mut cfg = AppConfig::default();
    cfg.database.max_lifetime_secs = 0;
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn test_validate_rejects_bad_geo_bases() {
    let mut cfg = AppConfig::default();
    cfg.geo.ip_api_base = String::new();
    assert!(config::validate(&cfg).is_err());

    let mut cfg = AppConfig::default();
    cfg.geo.nominatim_base = "ftp://example.org".to_string();
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn test_auth_token_accessor() {
    let mut cfg = AppConfig::default();
    assert!(cfg.auth_token().is_none());

    cfg.auth = Some(AuthConfig { token: Some(String::new()) });
    assert!(cfg.auth_token().is_none(), "empty token means auth disabled");

    cfg.auth = Some(AuthConfig { token: Some("secret".to_string()) });
    assert_eq!(cfg.auth_token(), Some("secret"));
}
