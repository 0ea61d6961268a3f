//! Layered configuration for dreimeta.
//!
//! Values are merged from, in increasing priority:
//!
//! 1. built-in defaults,
//! 2. a configuration file: the one passed explicitly, otherwise
//!    `./dreimeta.toml`, otherwise `config.toml` in the platform's
//!    configuration directory (TOML, YAML or JSON, chosen by extension),
//! 3. environment variables prefixed with `DREIMETA_`, using `__` to reach
//!    nested keys (e.g. `DREIMETA_OUTPUT__KEY_STYLE=plain`).

pub mod error;

use directories::ProjectDirs;
use dreimeta_catalog::KeyStyle;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::error::{ErrorKind, Result};

/// File name looked up in the working directory when no file is given.
pub const DEFAULT_FILE_NAME: &str = "dreimeta.toml";
/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "DREIMETA_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database holding the catalog.
    pub database: PathBuf,
    /// Base URL of the published web data directory. Relative links of the
    /// catalog are resolved against it.
    pub web_data_url: String,
    /// Directory containing one HTML template per collection type.
    pub templates_dir: PathBuf,
    /// Directory the rendered HTML pages are written to.
    pub web_dir: PathBuf,
    pub output: OutputConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("metadata/db.sqlite"),
            web_data_url: "https://dreimetadaten.de/data".to_string(),
            templates_dir: PathBuf::from("web/templates"),
            web_dir: PathBuf::from("web"),
            output: OutputConfig::default(),
        }
    }
}

/// How exported JSON documents are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub key_style: KeyStyle,
    pub pretty: bool,
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self { key_style: KeyStyle::Prefixed, pretty: true }
    }
}

impl Config {
    /// Loads the merged configuration.
    ///
    /// An explicitly given `file` must exist; discovered files are optional.
    #[instrument(skip_all)]
    pub fn load(file: Option<impl AsRef<Path>>) -> Result<Self> {
        let file = match file {
            Some(file) if !file.as_ref().is_file() => exn::bail!(ErrorKind::NotFound(file.as_ref().to_path_buf())),
            Some(file) => Some(file.as_ref().to_path_buf()),
            None => Self::discover(),
        };
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            debug!(file = %file.display(), "merging configuration file");
            figment = match file.extension().and_then(|e| e.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(file)),
                Some("json") => figment.merge(Json::file(file)),
                _ => figment.merge(Toml::file(file)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract().or_raise(|| ErrorKind::Load)
    }

    /// The first configuration file found in the usual places, if any.
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(DEFAULT_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        ProjectDirs::from("de", "dreimetadaten", "dreimeta")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None::<&Path>).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_discovered_file_and_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_FILE_NAME,
                r#"
                    database = "catalog.sqlite"
                    web_dir = "public"

                    [output]
                    pretty = false
                "#,
            )?;
            jail.set_env("DREIMETA_WEB_DIR", "dist");
            jail.set_env("DREIMETA_OUTPUT__KEY_STYLE", "plain");
            let config = Config::load(None::<&Path>).unwrap();
            assert_eq!(config.database, PathBuf::from("catalog.sqlite"));
            assert_eq!(config.web_dir, PathBuf::from("dist"));
            assert_eq!(config.output, OutputConfig { key_style: KeyStyle::Plain, pretty: false });
            assert_eq!(config.templates_dir, Config::default().templates_dir);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("site.yaml", "web_data_url: http://localhost:8080/data\noutput:\n  key_style: plain\n")?;
            let config = Config::load(Some("site.yaml")).unwrap();
            assert_eq!(config.web_data_url, "http://localhost:8080/data");
            assert_eq!(config.output.key_style, KeyStyle::Plain);
            assert!(config.output.pretty);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let err = Config::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }
}
