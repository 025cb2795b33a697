use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "PDFBATCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/pdfbatch.toml";
const ENV_PREFIX: &str = "PDFBATCH";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    load_with_environment(config_path, environment())
}

// PDFBATCH__POOL__WORKERS -> pool.workers
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn load_with_environment(config_path: PathBuf, environment: Environment) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    builder = builder.add_source(environment);

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.pool.workers, 30);
        assert_eq!(config.output.file_prefix, "ReglamentoConvivencia");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[source]
path = "data/schools.csv"
delimiter = ","
id_column = "id"

[fetch]
url_template = "http://localhost:9000/docs/{}.pdf"
timeout = 15
connect_timeout = "500ms"

[output]
dir = "out"

[pool]
workers = 8
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.source.path, PathBuf::from("data/schools.csv"));
        assert_eq!(config.source.delimiter, ",");
        assert_eq!(config.source.id_column, "id");
        assert_eq!(config.fetch.url_template, "http://localhost:9000/docs/{}.pdf");
        assert_eq!(config.fetch.timeout.as_duration(), Duration::from_secs(15));
        assert_eq!(config.fetch.connect_timeout.as_duration(), Duration::from_millis(500));
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.file_prefix, "ReglamentoConvivencia");
        assert_eq!(config.pool.workers, 8);
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        fs::write(&config_path, "[pool]\nworkers = 8\n\n[fetch]\ntimeout = \"15s\"\n").unwrap();

        let vars = config::Map::from([
            ("PDFBATCH__POOL__WORKERS".to_string(), "50".to_string()),
            ("PDFBATCH__FETCH__TIMEOUT".to_string(), "90s".to_string()),
            ("OTHER__POOL__WORKERS".to_string(), "1".to_string()),
        ]);

        let config = load_with_environment(config_path, environment().source(Some(vars))).unwrap();
        assert_eq!(config.pool.workers, 50);
        assert_eq!(config.fetch.timeout.as_duration(), Duration::from_secs(90));
        assert_eq!(config.output.file_prefix, "ReglamentoConvivencia");
    }
}
