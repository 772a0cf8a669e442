#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_OUTPUT_PATH: &str = "./diagrams";
pub const DEFAULT_FILENAME: &str = "terraform_diagram";
pub const MAX_DEPTH_LIMIT: usize = 10;

/// Checks shared by every config source.
pub(crate) fn validate_settings(
    title: &str,
    output_path: &str,
    filename: &str,
    max_depth: usize,
    include_types: &[String],
    exclude_types: &[String],
) -> Result<()> {
    validation::validate_non_empty_string("diagram.title", title)?;
    validation::validate_path("output.path", output_path)?;
    validation::validate_non_empty_string("output.filename", filename)?;
    validation::validate_range("grouping.max_depth", max_depth, 1, MAX_DEPTH_LIMIT)?;
    validation::validate_type_names("filters.include", include_types)?;
    validation::validate_type_names("filters.exclude", exclude_types)?;
    Ok(())
}

fn default_formats(formats: &[OutputFormat]) -> Vec<OutputFormat> {
    if formats.is_empty() {
        vec![OutputFormat::Json]
    } else {
        let mut unique = Vec::new();
        for &format in formats {
            if !unique.contains(&format) {
                unique.push(format);
            }
        }
        unique
    }
}

#[cfg(feature = "cli")]
pub use cli_args::{AnalyzeArgs, Cli, CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_args {
    use super::*;
    use crate::domain::model::{GroupMode, DEFAULT_MAX_DEPTH, DEFAULT_TITLE};
    use crate::domain::ports::ConfigProvider;
    use crate::utils::validation::Validate;
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "diagraform")]
    #[command(about = "Lay out Terraform state as grouped, nested architecture diagrams")]
    #[command(version)]
    pub struct Cli {
        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Build a layout plan from a state file and write it out
        Generate(CliConfig),
        /// Print resource statistics for a state file
        Analyze(AnalyzeArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct AnalyzeArgs {
        /// Path to the `terraform show -json` output
        pub state_file: PathBuf,

        #[arg(long, help = "Print per-type counts as CSV")]
        pub csv: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct CliConfig {
        /// Path to the `terraform show -json` output
        pub state_file: PathBuf,

        #[arg(short, long, help = "Output directory [default: ./diagrams]")]
        pub output: Option<String>,

        #[arg(short, long, help = "Output file stem [default: terraform_diagram]")]
        pub filename: Option<String>,

        #[arg(short = 't', long = "filter", help = "Only include these resource types")]
        pub filter: Vec<String>,

        #[arg(short, long, help = "Exclude these resource types")]
        pub exclude: Vec<String>,

        #[arg(short = 'g', long, value_enum, help = "Group resources by container or type")]
        pub group_by: Option<GroupMode>,

        #[arg(long, help = "Nest resources under the hubs they depend on")]
        pub nested: bool,

        #[arg(long, help = "Maximum dependents nesting depth [default: 3]")]
        pub max_depth: Option<usize>,

        #[arg(long = "format", value_enum, help = "Output formats [default: json]")]
        pub formats: Vec<OutputFormat>,

        #[arg(long, help = "Diagram title")]
        pub title: Option<String>,

        #[arg(short, long, help = "TOML config file; flags override its values")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Log CPU and memory per phase")]
        pub monitor: bool,
    }

    impl CliConfig {
        pub fn new(state_file: impl Into<PathBuf>) -> Self {
            Self {
                state_file: state_file.into(),
                output: None,
                filename: None,
                filter: Vec::new(),
                exclude: Vec::new(),
                group_by: None,
                nested: false,
                max_depth: None,
                formats: Vec::new(),
                title: None,
                config: None,
                monitor: false,
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn title(&self) -> &str {
            self.title.as_deref().unwrap_or(DEFAULT_TITLE)
        }

        fn group_mode(&self) -> GroupMode {
            self.group_by.unwrap_or_default()
        }

        fn nested(&self) -> bool {
            self.nested
        }

        fn include_types(&self) -> &[String] {
            &self.filter
        }

        fn exclude_types(&self) -> &[String] {
            &self.exclude
        }

        fn max_depth(&self) -> usize {
            self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
        }

        fn output_path(&self) -> &str {
            self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
        }

        fn filename(&self) -> &str {
            self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
        }

        fn output_formats(&self) -> Vec<OutputFormat> {
            default_formats(&self.formats)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path(
                "state_file",
                &self.state_file.to_string_lossy(),
            )?;
            validate_settings(
                self.title(),
                self.output_path(),
                self.filename(),
                self.max_depth(),
                self.include_types(),
                self.exclude_types(),
            )
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_generate_defaults() {
            let cli = Cli::parse_from(["diagraform", "generate", "state.json"]);
            let Command::Generate(config) = cli.command else {
                panic!("expected generate");
            };

            assert_eq!(config.state_file, PathBuf::from("state.json"));
            assert_eq!(config.title(), DEFAULT_TITLE);
            assert_eq!(config.group_mode(), GroupMode::None);
            assert_eq!(config.max_depth(), DEFAULT_MAX_DEPTH);
            assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
            assert_eq!(config.filename(), DEFAULT_FILENAME);
            assert_eq!(config.output_formats(), vec![OutputFormat::Json]);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_generate_flags() {
            let cli = Cli::parse_from([
                "diagraform", "-v", "generate", "state.json",
                "-t", "aws_instance", "-t", "aws_vpc",
                "-e", "aws_iam_role",
                "-g", "vpc", "--nested", "--max-depth", "5",
                "--format", "csv", "--format", "json", "--format", "csv",
                "-o", "out", "-f", "infra",
            ]);
            assert!(cli.verbose);
            let Command::Generate(config) = cli.command else {
                panic!("expected generate");
            };

            assert_eq!(config.include_types(), ["aws_instance", "aws_vpc"]);
            assert_eq!(config.exclude_types(), ["aws_iam_role"]);
            assert_eq!(config.group_mode(), GroupMode::Vpc);
            assert!(config.nested());
            assert_eq!(config.max_depth(), 5);
            assert_eq!(
                config.output_formats(),
                vec![OutputFormat::Csv, OutputFormat::Json]
            );
            assert_eq!(config.output_path(), "out");
            assert_eq!(config.filename(), "infra");
        }

        #[test]
        fn test_validation_rejects_bad_depth_and_blank_types() {
            let mut config = CliConfig::new("state.json");
            config.max_depth = Some(0);
            assert!(config.validate().is_err());

            config.max_depth = Some(MAX_DEPTH_LIMIT + 1);
            assert!(config.validate().is_err());

            config.max_depth = None;
            config.filter = vec!["  ".to_string()];
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_analyze_args() {
            let cli = Cli::parse_from(["diagraform", "analyze", "state.json", "--csv"]);
            let Command::Analyze(args) = cli.command else {
                panic!("expected analyze");
            };
            assert!(args.csv);
        }

        #[test]
        fn test_invalid_group_mode_rejected() {
            assert!(Cli::try_parse_from(["diagraform", "generate", "s.json", "-g", "region"]).is_err());
        }
    }
}
