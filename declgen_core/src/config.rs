use crate::error::{DeclgenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::{debug, error, info, trace, warn};

// Pattern to match ${VAR_NAME} or ${VAR_NAME:-default}
static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .expect("Invalid regex for environment variable substitution")
});

/// One markup namespace allow-list entry: a CLR namespace and the markup
/// namespace URIs that expose it.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct XamlNamespaceConfig {
    pub name: String,
    #[serde(default)]
    pub uris: Vec<String>,
}

/// One XAML-enabled assembly with its namespace mappings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct XamlAssemblyConfig {
    pub name: String,
    #[serde(default)]
    pub namespace: Vec<XamlNamespaceConfig>,
}

/// Configuration for the XAML usage generator: the assembly allow-list,
/// excluded base classes, and where to find additional filter files.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct XamlConfig {
    /// Directory scanned (recursively) for filter files at initialization.
    #[serde(default)]
    pub filter_directory: Option<PathBuf>,

    /// Regex matched against file names under `filter_directory`.
    #[serde(default = "default_filter_pattern")]
    pub filter_pattern: String,

    /// Inline allow-list entries, merged with entries from filter files.
    #[serde(default)]
    pub assembly: Vec<XamlAssemblyConfig>,

    /// Full names of base classes whose subclasses never get usage examples.
    #[serde(default)]
    pub excluded_classes: Vec<String>,
}

fn default_filter_pattern() -> String {
    r"\.xamlfilter\.toml$".to_string()
}

/// The per-generator configuration fragment handed to `initialize`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Visual Basic only: emit the classic ` _` continuation character
    /// before forced line breaks.
    #[serde(default)]
    pub include_line_continuation: bool,

    /// Emit named types as cross-reference links rather than plain
    /// identifiers.
    #[serde(default = "default_true")]
    pub render_references: bool,

    /// Column budget for line-wrap decisions.
    #[serde(default = "default_max_width")]
    pub max_width: usize,

    #[serde(default)]
    pub xaml: XamlConfig,
}

fn default_true() -> bool {
    true
}

fn default_max_width() -> usize {
    crate::writer::DEFAULT_MAX_WIDTH
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            include_line_continuation: false,
            render_references: true,
            max_width: crate::writer::DEFAULT_MAX_WIDTH,
            xaml: XamlConfig::default(),
        }
    }
}

/// Unified configuration for a declgen host.
/// Holds the shared generator defaults plus named per-language overrides.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DeclgenConfig {
    /// Defaults applied to every generator.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Per-language overrides keyed by language id (e.g. "VisualBasic").
    #[serde(default)]
    pub overrides: std::collections::BTreeMap<String, GeneratorConfig>,
}

impl DeclgenConfig {
    /// Load configuration by searching for declgen.toml in the current
    /// directory and its ancestors.
    pub fn new() -> Result<DeclgenConfig> {
        info!("Loading declgen configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let config_path = Self::find_config_file()?;
        info!("Found configuration file at: {:?}", config_path);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            DeclgenError::from(e)
        })?;

        debug!("Configuration file size: {} bytes", contents.len());

        let mut config: DeclgenConfig = toml::from_str(&contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            DeclgenError::config(e.to_string())
        })?;

        debug!("Successfully parsed TOML configuration");

        debug!("Substituting environment variables in configuration");
        if let Some(directory) = &config.generator.xaml.filter_directory {
            let substituted =
                Self::substitute_env_vars(&directory.to_string_lossy())?;
            config.generator.xaml.filter_directory = Some(PathBuf::from(substituted));
        }
        for override_config in config.overrides.values_mut() {
            if let Some(directory) = &override_config.xaml.filter_directory {
                let substituted =
                    Self::substitute_env_vars(&directory.to_string_lossy())?;
                override_config.xaml.filter_directory = Some(PathBuf::from(substituted));
            }
        }

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// The effective configuration for one language: the override when one
    /// is present, the shared defaults otherwise.
    pub fn for_language(&self, language_id: &str) -> GeneratorConfig {
        self.overrides
            .get(language_id)
            .cloned()
            .unwrap_or_else(|| self.generator.clone())
    }

    /// Searches for `declgen.toml` starting from the current directory
    /// and traversing up to the root.
    fn find_config_file() -> Result<PathBuf> {
        let current_dir = env::current_dir()?;
        debug!("Starting config file search from: {:?}", current_dir);

        for path in current_dir.ancestors() {
            let config_path = path.join("declgen.toml");
            trace!("Checking for config at: {:?}", config_path);
            if config_path.exists() {
                return Ok(config_path);
            }
        }

        error!("Configuration file 'declgen.toml' not found in any parent directory.");
        Err(DeclgenError::config(
            "declgen.toml not found in current or any parent directory.",
        ))
    }

    /// Substitute environment variables in config strings
    /// Supports ${VAR_NAME:-default} syntax
    fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        for cap in ENV_VAR_PATTERN.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            trace!("Looking for environment variable: {}", var_name);

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(DeclgenError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            let full_match = &cap[0];
            result = result.replace(full_match, &replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert!(!config.include_line_continuation);
        assert!(config.render_references);
        assert_eq!(config.max_width, 80);
    }

    #[test]
    fn test_generator_config_deserialize_empty() {
        let config: GeneratorConfig = toml::from_str("").unwrap();
        assert!(config.render_references);
        assert!(config.xaml.assembly.is_empty());
    }

    #[test]
    fn test_generator_config_deserialize_flags() {
        let toml_str = r#"
            include_line_continuation = true
            render_references = false
            max_width = 100
        "#;
        let config: GeneratorConfig = toml::from_str(toml_str).unwrap();
        assert!(config.include_line_continuation);
        assert!(!config.render_references);
        assert_eq!(config.max_width, 100);
    }

    #[test]
    fn test_xaml_config_deserialize() {
        let toml_str = r#"
            excluded_classes = ["System.Windows.Window"]

            [[assembly]]
            name = "PresentationFramework"

            [[assembly.namespace]]
            name = "System.Windows.Controls"
            uris = ["http://schemas.microsoft.com/winfx/2006/xaml/presentation"]
        "#;
        let config: XamlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.excluded_classes.len(), 1);
        assert_eq!(config.assembly.len(), 1);
        assert_eq!(config.assembly[0].name, "PresentationFramework");
        assert_eq!(config.assembly[0].namespace[0].uris.len(), 1);
        assert_eq!(config.filter_pattern, r"\.xamlfilter\.toml$");
    }

    #[test]
    fn test_declgen_config_override_lookup() {
        let toml_str = r#"
            [generator]
            render_references = true

            [overrides.VisualBasic]
            include_line_continuation = true
        "#;
        let config: DeclgenConfig = toml::from_str(toml_str).unwrap();
        assert!(config.for_language("VisualBasic").include_line_continuation);
        assert!(!config.for_language("CSharp").include_line_continuation);
    }

    #[test]
    fn test_substitute_env_vars_basic() {
        temp_env::with_var("DECLGEN_TEST_VAR", Some("hello"), || {
            let result = DeclgenConfig::substitute_env_vars("${DECLGEN_TEST_VAR}").unwrap();
            assert_eq!(result, "hello");
        });
    }

    #[test]
    fn test_substitute_env_vars_with_default() {
        let result =
            DeclgenConfig::substitute_env_vars("${DECLGEN_UNSET_VAR_9876:-fallback}").unwrap();
        assert_eq!(result, "fallback");
    }

    #[test]
    fn test_substitute_env_vars_missing_returns_error() {
        let result = DeclgenConfig::substitute_env_vars("${DECLGEN_DEFINITELY_NOT_SET_12345}");
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_no_match() {
        let result = DeclgenConfig::substitute_env_vars("no variables here").unwrap();
        assert_eq!(result, "no variables here");
    }

    #[test]
    fn test_substitute_env_vars_preserves_non_matching_braces() {
        let result = DeclgenConfig::substitute_env_vars("{not_a_var}").unwrap();
        assert_eq!(result, "{not_a_var}");
    }

    #[test]
    #[ignore = "requires --test-threads=1 due to env::set_current_dir"]
    fn test_find_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let original_dir = env::current_dir().unwrap();

        env::set_current_dir(temp_dir.path()).unwrap();
        let result = DeclgenConfig::find_config_file();
        env::set_current_dir(original_dir).unwrap();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("declgen.toml not found"));
    }

    #[test]
    #[ignore = "requires --test-threads=1 due to env::set_current_dir"]
    fn test_find_config_file_in_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let child_dir = temp_dir.path().join("child");
        fs::create_dir(&child_dir).unwrap();

        let config_path = temp_dir.path().join("declgen.toml");
        fs::write(&config_path, "# test config").unwrap();
        let expected_canonical = config_path.canonicalize().unwrap();

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&child_dir).unwrap();
        let result = DeclgenConfig::find_config_file();
        env::set_current_dir(original_dir).unwrap();

        assert!(result.is_ok());
        let result_canonical = result.unwrap().canonicalize().unwrap();
        assert_eq!(result_canonical, expected_canonical);
    }
}
