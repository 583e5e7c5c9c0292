//! `vfc` - headless front end for Video Format Converter.
//!
//! Loads settings, initializes logging, runs one conversion and prints the
//! four-value result as JSON on stdout.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use vfc_core::config::{ConfigManager, Settings};
use vfc_core::logging::{
    init_tracing, init_tracing_with_file, JobLogger, LogCallback, LogConfig, LogLevel,
};
use vfc_core::models::{MAX_QUALITY_VALUE, MIN_QUALITY_VALUE};
use vfc_core::paths::base_name;
use vfc_core::{
    calculate_bitrate, node_schema, process_video_with, ErrorKind, ProcessOptions, SystemTools,
    TranscodeError, TranscodeRequest,
};

use cli::{Cli, Command, RunArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config_manager = ConfigManager::new(&cli.config);
    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }
    let settings = config_manager.settings().clone();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        settings.logging.level
    };
    let _log_guard = if settings.logging.log_to_file {
        init_tracing_with_file(level, &config_manager.logs_folder())
    } else {
        init_tracing(level);
        None
    };

    tracing::debug!("Config: {}", config_manager.path().display());
    tracing::debug!("Core version: {}", vfc_core::version());

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    match &cli.command {
        Command::Run(args) => run_conversion(args, settings, cli.verbose),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&node_schema())?);
            Ok(())
        }
        Command::Bitrate { quality } => {
            if !(MIN_QUALITY_VALUE..=MAX_QUALITY_VALUE).contains(quality) {
                return Err(TranscodeError::invalid_input(format!(
                    "quality {} is outside {}..={}",
                    quality, MIN_QUALITY_VALUE, MAX_QUALITY_VALUE
                ))
                .into());
            }
            println!("{}", calculate_bitrate(*quality));
            Ok(())
        }
    }
}

fn run_conversion(args: &RunArgs, settings: &Settings, verbose: bool) -> Result<()> {
    let request = args.build_request(&settings.paths.output_folder)?;
    let logger = job_logger(&request, settings, verbose)?;
    if let Some(path) = logger.log_path() {
        tracing::info!("Job log: {}", path.display());
    }

    let tools = SystemTools::from_settings(&settings.tools);
    let options = ProcessOptions::from_settings(settings);

    let outcome = process_video_with(&request, &tools, &logger, &options)?;
    if outcome.is_disabled() {
        tracing::info!("Output disabled; nothing was written");
    } else if let Some(output) = outcome.output() {
        tracing::info!(
            "Wrote {} at {} kbps",
            output.output_path.display(),
            output.bitrate_kbps
        );
    }

    let json = serde_json::to_string_pretty(&outcome.to_node_output())
        .context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

/// Per-request logger named after the output (or source) file.
///
/// Detached when file logging is off or the request is disabled.
fn job_logger(
    request: &TranscodeRequest,
    settings: &Settings,
    verbose: bool,
) -> Result<JobLogger> {
    let job_name = if request.output_filename.trim().is_empty() {
        std::path::Path::new(&request.video_path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| base_name(""))
    } else {
        base_name(&request.output_filename)
    };

    let config = if verbose {
        LogConfig::verbose()
    } else {
        LogConfig::from_settings(&settings.logging)
    };
    let callback: Option<LogCallback> = if verbose {
        Some(Box::new(|line: &str| eprintln!("{}", line)))
    } else {
        None
    };

    // A disabled request writes nothing, not even its log.
    if settings.logging.log_to_file && request.output_enabled {
        JobLogger::new(job_name, &settings.paths.logs_folder, config, callback)
            .context("Failed to create job log")
    } else {
        Ok(JobLogger::detached(job_name, config, callback))
    }
}

/// Exit status by error class: 2 input, 3 configuration, 4 external
/// process, 1 anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<TranscodeError>().map(TranscodeError::kind) {
        Some(ErrorKind::InputValidation) => 2,
        Some(ErrorKind::Configuration) => 3,
        Some(ErrorKind::ExternalProcess) => 4,
        Some(ErrorKind::Io) | None => 1,
    }
}
