//! Project configuration: chisel.toml layered with CHISEL_* environment
//! variables over built-in defaults.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

use chisel_transforms::ChainConfig;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "chisel.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Root directory the file globs are resolved against.
    pub project_root: PathBuf,

    /// File globs relative to the project root; `!` prefixes negate.
    pub files: Vec<String>,

    /// Source root for the `~/` import alias, relative to the project root.
    pub source_root: PathBuf,

    /// Import name targeted by the unused-import transform.
    pub unused_import: String,

    /// Chain-engine configuration (root handles, combinator, sinks).
    pub chain: ChainConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            files: vec!["src/**/*.ts".to_string()],
            source_root: PathBuf::from("src"),
            unused_import: "messageWithContext".to_string(),
            chain: ChainConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from an explicit file, or from `chisel.toml` in
    /// the working directory when present, layered with `CHISEL_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let toml = match path {
            Some(path) => Toml::file_exact(path),
            None => Toml::file(CONFIG_FILE),
        };
        Figment::new()
            .merge(toml)
            .merge(Env::prefixed("CHISEL_").split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_original_deployment() {
        let config = ProjectConfig::default();
        assert_eq!(config.files, ["src/**/*.ts"]);
        assert_eq!(config.chain.combinator, "$if");
        assert_eq!(config.chain.root_identifiers, ["db", "dbtx"]);
        assert_eq!(
            config.chain.sink_methods,
            ["execute", "executeTakeFirst", "executeTakeFirstOrThrow"]
        );
        assert_eq!(config.chain.accumulator, "query");
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chisel.toml");
        std::fs::write(
            &path,
            r#"
project_root = "/repo"
files = ["services/**/*.ts", "!**/__tests__/*"]

[chain]
root_identifiers = ["db"]
accumulator = "builder"
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(Some(&path)).unwrap();
        assert_eq!(config.project_root, PathBuf::from("/repo"));
        assert_eq!(config.files, ["services/**/*.ts", "!**/__tests__/*"]);
        assert_eq!(config.chain.root_identifiers, ["db"]);
        assert_eq!(config.chain.accumulator, "builder");
        // Untouched sections keep their defaults.
        assert_eq!(config.chain.combinator, "$if");
        assert_eq!(config.unused_import, "messageWithContext");
    }
}
