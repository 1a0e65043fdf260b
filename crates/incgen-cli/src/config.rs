//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`INCGEN__GENERATION__ONCE=true`)
//! 3. Explicit `--config <FILE>` (must exist)
//! 4. Local `.incgen.toml` in the current directory
//! 5. Global `config.toml` in the platform config directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use incgen_core::domain::{GuardRule, Layout};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".incgen.toml";

const ENV_PREFIX: &str = "INCGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for generation runs.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub once: bool,
    pub layout: Layout,
    pub guard_style: GuardRule,
    pub strict_guards: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from every source in priority order.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
            explicit,
        )
    }

    /// Load with explicit file locations.
    pub fn load_from(
        global: Option<&Path>,
        local: &Path,
        explicit: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(global) = global {
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder.add_source(File::from(local).required(false));
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the global configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "incgen", "incgen")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file that settings come from: `--config` if given, then a local
    /// `.incgen.toml` if present, then the global file.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        Self::global_config_path().unwrap_or(local)
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "generation.once" => self.generation.once.to_string(),
            "generation.layout" => self.generation.layout.to_string(),
            "generation.guard_style" => self.generation.guard_style.to_string(),
            "generation.strict_guards" => self.generation.strict_guards.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key [`Self::get`] understands.
    pub const KEYS: &'static [&'static str] = &[
        "generation.once",
        "generation.layout",
        "generation.guard_style",
        "generation.strict_guards",
        "output.no_color",
        "output.format",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load_local(contents: &str) -> anyhow::Result<AppConfig> {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&local, contents).unwrap();
        AppConfig::load_from(None, &local, None)
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.generation.layout, Layout::Compact);
        assert_eq!(cfg.generation.guard_style, GuardRule::LettersOnly);
        assert!(!cfg.generation.once);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(
            Some(&dir.path().join("global.toml")),
            &dir.path().join("local.toml"),
            None,
        )
        .unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn local_file_overrides_defaults() {
        let cfg = load_local(
            "[generation]\nonce = true\nlayout = \"collector\"\nguard_style = \"keep-digits\"\n",
        )
        .unwrap();
        assert!(cfg.generation.once);
        assert_eq!(cfg.generation.layout, Layout::Collector);
        assert_eq!(cfg.generation.guard_style, GuardRule::KeepDigits);
        assert!(!cfg.generation.strict_guards);
    }

    #[test]
    fn explicit_file_beats_local_file() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&local, "[generation]\nlayout = \"collector\"\n").unwrap();
        fs::write(&explicit, "[generation]\nlayout = \"compact\"\n").unwrap();

        let cfg = AppConfig::load_from(None, &local, Some(&explicit)).unwrap();
        assert_eq!(cfg.generation.layout, Layout::Compact);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load_from(
            None,
            &dir.path().join("local.toml"),
            Some(&dir.path().join("nope.toml")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn legacy_layout_alias() {
        let cfg = load_local("[generation]\nlayout = \"legacy\"\n").unwrap();
        assert_eq!(cfg.generation.layout, Layout::Collector);
    }

    #[test]
    fn unknown_layout_is_an_error() {
        assert!(load_local("[generation]\nlayout = \"pyramid\"\n").is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("generation.layout").as_deref(), Some("compact"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("defaults.lang"), None);
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }
}
