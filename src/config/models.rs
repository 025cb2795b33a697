use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub pool: PoolConfig,
}

/// Tabular identifier input
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
    /// Single ASCII field separator
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Header name of the identifier column
    #[serde(default = "default_id_column")]
    pub id_column: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            delimiter: default_delimiter(),
            id_column: default_id_column(),
        }
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from("Directorio_Oficial_2023.csv")
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_id_column() -> String {
    "RBD".to_string()
}

/// HTTP fetch settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Every `{}` slot is replaced with the identifier
    #[serde(default = "default_url_template")]
    pub url_template: String,
    #[serde(default = "default_timeout")]
    pub timeout: HumanDuration,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: HumanDuration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_url_template() -> String {
    "https://cdnsae.mineduc.cl/documentos/{}/ReglamentodeConvivencia{}.pdf".to_string()
}

fn default_timeout() -> HumanDuration {
    HumanDuration::from_secs(60)
}

fn default_connect_timeout() -> HumanDuration {
    HumanDuration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("pdfbatch/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Download destination
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("PDF")
}

fn default_file_prefix() -> String {
    "ReglamentoConvivencia".to_string()
}

/// Worker pool sizing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.source.delimiter, ";");
        assert_eq!(config.source.id_column, "RBD");
        assert_eq!(config.fetch.timeout.as_duration(), Duration::from_secs(60));
        assert_eq!(config.output.dir, PathBuf::from("PDF"));
        assert_eq!(config.output.file_prefix, "ReglamentoConvivencia");
        assert_eq!(config.pool.workers, 30);
        assert_eq!(config.fetch.url_template.matches("{}").count(), 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[pool]
workers = 4

[fetch]
timeout = "5s"
            "#,
        )
        .unwrap();

        assert_eq!(config.pool.workers, 4);
        assert_eq!(config.fetch.timeout.as_duration(), Duration::from_secs(5));
        assert_eq!(config.fetch.connect_timeout.as_duration(), Duration::from_secs(10));
        assert_eq!(config.source.id_column, "RBD");
    }
}
