//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gated-rag";
const PROJECT_FILE: &str = "gated-rag.toml";
const ENV_PREFIX: &str = "GATED_RAG_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables `GATED_RAG_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./gated-rag.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/gated-rag/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    ///
    /// Environment overrides still apply so containerised deployments can
    /// run without any file.
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(None, None, None).extract().map_err(Box::new)
    }

    /// Build the merged provider chain from explicit file locations.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        // An explicit path that does not exist is an error, not a silent skip
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/gated-rag/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{}", PROJECT_FILE);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_files() {
        let config: FileConfig = ConfigLoader::figment(None, None, None).extract().unwrap();
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[llm]\nmodel = \"global-model\"\nbase_url = \"http://global:1/v1\"\n",
        );
        let project = write_toml(&dir, "project.toml", "[llm]\nmodel = \"project-model\"\n");
        let explicit = write_toml(&dir, "explicit.toml", "[retrieval]\ntop_k = 9\n");

        let config: FileConfig = ConfigLoader::figment(
            Some(&global),
            Some(&project),
            Some(&explicit),
        )
        .extract()
        .unwrap();

        assert_eq!(config.llm.model, "project-model");
        assert_eq!(config.llm.base_url, "http://global:1/v1");
        assert_eq!(config.retrieval.top_k, 9);
        // Untouched keys keep their defaults
        assert_eq!(config.reranker.top_n, 3);
    }

    #[test]
    fn test_missing_optional_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let config: FileConfig = ConfigLoader::figment(Some(&absent), Some(&absent), None)
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&absent)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_toml(&dir, "bad.toml", "[server]\nport = \"not a number\"\n");
        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&bad)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GATED_RAG_LLM__MODEL", "llama3");
            jail.set_env("GATED_RAG_RETRIEVAL__TOP_K", "7");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.llm.model, "llama3");
            assert_eq!(config.retrieval.top_k, 7);
            // Untouched keys keep their defaults
            assert_eq!(config.llm.timeout_secs, 120);
            assert_eq!(config.retrieval.max_sub_questions, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_explicit_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "explicit.toml",
                "[llm]\nmodel = \"file-model\"\ntimeout_secs = 9\n",
            )?;
            jail.set_env("GATED_RAG_LLM__MODEL", "llama3");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(Path::new("explicit.toml"))).extract()?;
            assert_eq!(config.llm.model, "llama3");
            assert_eq!(config.llm.timeout_secs, 9);
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_names_app_dir() {
        // Should return a path (even if file doesn't exist)
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("gated-rag"));
            assert!(path.ends_with("config.toml"));
        }
    }
}
