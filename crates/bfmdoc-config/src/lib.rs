use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of documentation files collected from the corpus root.
pub const DOC_FILE_EXTENSION: &str = "bfm";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// How parsed trees are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Tree,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log every token the lexer produces.
    pub dump_tokens: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glob patterns of files to skip.
    pub ignore: Vec<String>,
    /// Directory searched for documentation files when none are given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_root: Option<PathBuf>,
    pub output: OutputConfig,
    pub debug: DebugConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the corpus root
        config.corpus_root = config
            .corpus_root
            .map(|root| Self::expand_path(&root).unwrap_or(root));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/bfmdoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// Compile the ignore globs.
    pub fn ignore_set(&self) -> Result<IgnoreSet, ConfigError> {
        let patterns = self
            .ignore
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IgnoreSet {
            patterns,
            root: self.corpus_root.clone(),
        })
    }

    /// Documentation files under the corpus root, sorted. Empty without a root.
    pub fn corpus_files(&self) -> Vec<PathBuf> {
        let Some(root) = &self.corpus_root else {
            return Vec::new();
        };
        let pattern = root.join(format!("**/*.{DOC_FILE_EXTENSION}"));
        let mut files: Vec<PathBuf> = match glob::glob(&pattern.to_string_lossy()) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }
}

/// Compiled ignore globs.
///
/// A path is ignored when a pattern matches it as given or, with a corpus
/// root configured, relative to that root.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
    root: Option<PathBuf>,
}

impl IgnoreSet {
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = self
            .root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok());
        self.patterns.iter().any(|pattern| {
            pattern.matches_path(path) || relative.is_some_and(|rel| pattern.matches_path(rel))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/bfmdoc/config.toml"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.debug.dump_tokens);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            output: OutputConfig {
                format: OutputFormat::Tree,
            },
            debug: DebugConfig { dump_tokens: true },
            ignore: vec!["**/generated/*.bfm".to_string()],
            corpus_root: Some(PathBuf::from("/tmp/docs")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_format_is_lowercase_in_toml() {
        let config: Config = toml::from_str("[output]\nformat = \"tree\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Tree);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("BFMDOC_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$BFMDOC_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("BFMDOC_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "ignore = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            ignore: vec!["*.tmp.bfm".to_string()],
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_corpus_root_with_env_var_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        unsafe {
            env::set_var("BFMDOC_DOCS_ROOT", "/custom/docs");
        }
        std::fs::write(&config_file, "corpus_root = \"$BFMDOC_DOCS_ROOT/api\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.corpus_root, Some(PathBuf::from("/custom/docs/api")));

        unsafe {
            env::remove_var("BFMDOC_DOCS_ROOT");
        }
    }

    #[test]
    fn test_ignore_set_matches_globs() {
        let config = Config {
            ignore: vec!["**/generated/*".to_string(), "draft-*.bfm".to_string()],
            ..Config::default()
        };
        let ignore = config.ignore_set().unwrap();

        assert!(ignore.is_ignored(Path::new("src/generated/api.bfm")));
        assert!(ignore.is_ignored(Path::new("draft-intro.bfm")));
        assert!(!ignore.is_ignored(Path::new("src/api.bfm")));
    }

    #[test]
    fn test_ignore_set_matches_relative_to_root() {
        let config = Config {
            ignore: vec!["vendor/*".to_string()],
            corpus_root: Some(PathBuf::from("/work/docs")),
            ..Config::default()
        };
        let ignore = config.ignore_set().unwrap();

        assert!(ignore.is_ignored(Path::new("/work/docs/vendor/x.bfm")));
        assert!(!ignore.is_ignored(Path::new("/work/docs/own/x.bfm")));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let config = Config {
            ignore: vec!["[unclosed".to_string()],
            ..Config::default()
        };

        let err = config.ignore_set().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidIgnorePattern { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_corpus_files_are_collected_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::write(root.join("b.bfm"), "# b").unwrap();
        std::fs::write(root.join("nested/a.bfm"), "# a").unwrap();
        std::fs::write(root.join("notes.txt"), "not docs").unwrap();
        let config = Config {
            corpus_root: Some(root.to_path_buf()),
            ..Config::default()
        };

        let files = config.corpus_files();

        assert_eq!(files, vec![root.join("b.bfm"), root.join("nested/a.bfm")]);
    }

    #[test]
    fn test_corpus_files_without_root() {
        assert!(Config::default().corpus_files().is_empty());
    }
}
