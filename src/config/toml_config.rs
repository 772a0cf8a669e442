use crate::config::{default_formats, validate_settings, DEFAULT_FILENAME, DEFAULT_OUTPUT_PATH};
use crate::domain::model::{GroupMode, OutputFormat, DEFAULT_MAX_DEPTH, DEFAULT_TITLE};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DiagraformError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub diagram: Option<DiagramConfig>,
    pub grouping: Option<GroupingConfig>,
    pub filters: Option<FilterConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramConfig {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub mode: Option<GroupMode>,
    pub nested: Option<bool>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub filename: Option<String>,
    /// Kept as strings so an unknown name surfaces as a validation error, not a parse error.
    #[serde(default)]
    pub formats: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Err(DiagraformError::MissingConfigError {
                field: path.as_ref().display().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(DiagraformError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DiagraformError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiagraformError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_settings(
            self.title(),
            self.output_path(),
            self.filename(),
            self.max_depth(),
            self.include_types(),
            self.exclude_types(),
        )?;

        if let Some(output) = &self.output {
            let formats: Vec<String> = output.formats.iter().map(|f| f.to_lowercase()).collect();
            validation::validate_formats("output.formats", &formats, OutputFormat::NAMES)?;
        }

        Ok(())
    }

    /// Flags given on the command line win over the file.
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(title) = &cli.title {
            self.diagram.get_or_insert_with(Default::default).title = Some(title.clone());
        }

        let grouping = self.grouping.get_or_insert_with(Default::default);
        if let Some(mode) = cli.group_by {
            grouping.mode = Some(mode);
        }
        if cli.nested {
            grouping.nested = Some(true);
        }
        if let Some(max_depth) = cli.max_depth {
            grouping.max_depth = Some(max_depth);
        }

        let filters = self.filters.get_or_insert_with(Default::default);
        if !cli.filter.is_empty() {
            filters.include = cli.filter.clone();
        }
        if !cli.exclude.is_empty() {
            filters.exclude = cli.exclude.clone();
        }

        let output = self.output.get_or_insert_with(Default::default);
        if let Some(path) = &cli.output {
            output.path = Some(path.clone());
        }
        if let Some(filename) = &cli.filename {
            output.filename = Some(filename.clone());
        }
        if !cli.formats.is_empty() {
            output.formats = cli.formats.iter().map(|f| f.as_str().to_string()).collect();
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn title(&self) -> &str {
        self.diagram
            .as_ref()
            .and_then(|d| d.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
    }

    fn group_mode(&self) -> GroupMode {
        self.grouping
            .as_ref()
            .and_then(|g| g.mode)
            .unwrap_or_default()
    }

    fn nested(&self) -> bool {
        self.grouping
            .as_ref()
            .and_then(|g| g.nested)
            .unwrap_or(false)
    }

    fn include_types(&self) -> &[String] {
        self.filters.as_ref().map(|f| f.include.as_slice()).unwrap_or(&[])
    }

    fn exclude_types(&self) -> &[String] {
        self.filters.as_ref().map(|f| f.exclude.as_slice()).unwrap_or(&[])
    }

    fn max_depth(&self) -> usize {
        self.grouping
            .as_ref()
            .and_then(|g| g.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn filename(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.filename.as_deref())
            .unwrap_or(DEFAULT_FILENAME)
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        let formats: Vec<OutputFormat> = self
            .output
            .as_ref()
            .map(|o| o.formats.iter().filter_map(|f| OutputFormat::parse(f)).collect())
            .unwrap_or_default();
        default_formats(&formats)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
