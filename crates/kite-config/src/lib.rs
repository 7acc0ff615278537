//! Configuration management.

mod settings;

pub use settings::{AppConfig, KiteSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Environment overrides use the `KITE_CLI__` prefix with `__` between
/// levels, e.g. `KITE_CLI__KITE__BASE_URL`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("KITE_CLI")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.kite.api_key_env, "KITE_API_KEY");
        assert_eq!(config.kite.callback_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir()
            .join(format!("kite-config-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[kite]\nbase_url = \"http://127.0.0.1:9999\"\ncallback_timeout_secs = 30\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();
        drop(file);

        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.kite.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.kite.callback_timeout_secs, 30);
        assert_eq!(config.kite.request_timeout_secs, 7);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let path = std::env::temp_dir()
            .join(format!("kite-config-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[kite]\nrequest_timeout_secs = 0\n").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
