use anyhow::Context;
use clap::Parser;
use diagraform::config::{toml_config::TomlConfig, AnalyzeArgs, Cli, Command};
use diagraform::domain::ports::ConfigProvider;
use diagraform::utils::error::{DiagraformError, ErrorSeverity};
use diagraform::utils::{logger, validation::Validate};
use diagraform::{AnalysisReport, CliConfig, LayoutEngine, LocalOutput, SnapshotReader};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI arguments: {:?}", cli);

    match cli.command {
        Command::Generate(config) => generate(config),
        Command::Analyze(args) => analyze(args),
    }
}

fn generate(cli_config: CliConfig) -> anyhow::Result<()> {
    let monitor_enabled = cli_config.monitor;
    if monitor_enabled {
        tracing::info!("System monitoring enabled");
    }

    let result = match &cli_config.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            TomlConfig::from_file(path).and_then(|mut file_config| {
                file_config.apply_overrides(&cli_config);
                run_generate(file_config, &cli_config, monitor_enabled)
            })
        }
        None => run_generate(cli_config.clone(), &cli_config, monitor_enabled),
    };

    if let Err(e) = result {
        tracing::error!(
            "Diagram generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("Error: {}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run_generate<C>(config: C, cli_config: &CliConfig, monitor_enabled: bool) -> Result<(), DiagraformError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    cli_config.validate()?;

    let output = LocalOutput::new(config.output_path(), config.output_formats());
    let engine = LayoutEngine::new_with_monitoring(output, config, monitor_enabled);
    let summary = engine.run(&cli_config.state_file)?;

    println!(
        "Laid out {} of {} resources ({} edges)",
        summary.nodes, summary.resources, summary.edges
    );
    if summary.diagnostics > 0 {
        println!("{} unresolved references, see the plan's diagnostics", summary.diagnostics);
    }
    for path in &summary.outputs {
        println!("Saved: {}", path.display());
    }
    Ok(())
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let snapshot = SnapshotReader::read(&args.state_file)
        .with_context(|| format!("failed to analyze {}", args.state_file.display()))?;
    let report = AnalysisReport::from_snapshot(&snapshot);

    let stdout = std::io::stdout().lock();
    if args.csv {
        report.write_csv(stdout)?;
    } else {
        report.write_text(stdout)?;
    }
    Ok(())
}
