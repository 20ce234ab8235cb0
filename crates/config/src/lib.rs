use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "estately.toml",
    "config/estately.toml",
    "crates/config/estately.toml",
    "../estately.toml",
    "../config/estately.toml",
    "../crates/config/estately.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            database: DatabaseConfig::default(),
            uploads: UploadConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://estately.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for the listing image upload endpoint and static serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "UploadConfig::default_directory")]
    pub directory: String,
    #[serde(default = "UploadConfig::default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    #[serde(default = "UploadConfig::default_max_files_per_request")]
    pub max_files_per_request: u32,
}

impl UploadConfig {
    fn default_directory() -> String {
        "uploads".to_string()
    }

    const fn default_max_file_size_bytes() -> u64 {
        10 * 1024 * 1024
    }

    const fn default_max_files_per_request() -> u32 {
        10
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
            max_file_size_bytes: Self::default_max_file_size_bytes(),
            max_files_per_request: Self::default_max_files_per_request(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use estately_config::load;
///
/// std::env::remove_var("ESTATELY_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("uploads.directory", defaults.uploads.directory.clone())
        .unwrap()
        .set_default(
            "uploads.max_file_size_bytes",
            i64::try_from(defaults.uploads.max_file_size_bytes).unwrap_or(i64::MAX),
        )
        .unwrap()
        .set_default(
            "uploads.max_files_per_request",
            i64::from(defaults.uploads.max_files_per_request),
        )
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("ESTATELY").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ESTATELY_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ESTATELY_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
