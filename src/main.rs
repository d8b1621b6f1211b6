// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::{Controller, RepositionTarget};

mod app_config;
mod app_controller;
mod composition;
mod errors;
mod file_utils;
mod media_probe;
mod sink;
mod transcribe;
mod transcript;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe videos and build overlay projects (default command)
    Process(ProcessArgs),

    /// Build a composition plan from an existing transcript JSON
    Plan {
        /// Transcript JSON file
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,

        /// Where to write the plan (defaults next to the transcript)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,

        /// Set logging level
        #[arg(short, long, value_enum)]
        log_level: Option<CliLogLevel>,
    },

    /// Render a previously built project to the output folder
    Render {
        /// Project file to render
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,

        /// Set logging level
        #[arg(short, long, value_enum)]
        log_level: Option<CliLogLevel>,
    },

    /// Move the text overlays of a persisted plan (top, bottom, a y value, or reset)
    Reposition {
        /// Persisted composition plan
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// New placement: top, bottom, reset or a normalized y in [-1, 1]
        #[arg(short, long)]
        position: String,

        /// Source video; when given the project is rebuilt with the new placement
        #[arg(short, long)]
        video: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,

        /// Set logging level
        #[arg(short, long, value_enum)]
        log_level: Option<CliLogLevel>,
    },

    /// Generate shell completions for overtitle
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing projects
    #[arg(short, long)]
    force_overwrite: bool,

    /// Do not wait for confirmation between videos
    #[arg(short, long)]
    yes: bool,

    /// Transcription service URL
    #[arg(short, long)]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// overtitle - transcript overlays for video timelines
///
/// Transcribes videos through an external service and turns the timed
/// transcript into an overlay composition inside the external editor.
#[derive(Parser, Debug)]
#[command(name = "overtitle")]
#[command(author = "overtitle contributors")]
#[command(version = "1.0.0")]
#[command(about = "Transcript overlay composition tool")]
#[command(long_about = "overtitle transcribes videos and builds timed text overlay projects for an external editor.

EXAMPLES:
    overtitle videos/                          # Process every video in a folder
    overtitle process -f talk.mp4              # Rebuild one video's project
    overtitle process -y videos/               # Batch mode without confirmations
    overtitle plan output/talk/transcript.json # Plan without touching the editor
    overtitle render output/talk/talk.blend    # Render a built project
    overtitle reposition output/talk/composition.json -p bottom
    overtitle completions bash > overtitle.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input video file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing projects
    #[arg(short, long)]
    force_overwrite: bool,

    /// Do not wait for confirmation between videos
    #[arg(short, long)]
    yes: bool,

    /// Transcription service URL
    #[arg(short, long)]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "overtitle", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args).await,
        Some(Commands::Plan {
            transcript,
            output,
            config_path,
            log_level,
        }) => {
            let config = load_config(&config_path, &log_level, &None)?;
            let controller = Controller::with_config(config)?;

            let plan_file = output.unwrap_or_else(|| {
                transcript
                    .parent()
                    .unwrap_or(Path::new("."))
                    .join("composition.json")
            });
            controller.plan_transcript(&transcript, &plan_file)?;
            Ok(())
        }
        Some(Commands::Render {
            project,
            config_path,
            log_level,
        }) => {
            let config = load_config(&config_path, &log_level, &None)?;
            let controller = Controller::with_config(config)?;
            let output = controller.render(project).await?;
            log::info!("Render written to {:?}", output);
            Ok(())
        }
        Some(Commands::Reposition {
            plan,
            position,
            video,
            config_path,
            log_level,
        }) => {
            let config = load_config(&config_path, &log_level, &None)?;
            let controller = Controller::with_config(config)?;
            let target = RepositionTarget::parse(&position)?;
            controller.reposition(&plan, target, video).await?;
            Ok(())
        }
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let process_args = ProcessArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                yes: cli.yes,
                api_url: cli.api_url,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_process(process_args).await
        }
    }
}

async fn run_process(options: ProcessArgs) -> Result<()> {
    let config = load_config(&options.config_path, &options.log_level, &options.api_url)?;
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        controller
            .run(options.input_path.clone(), options.force_overwrite)
            .await?;
    } else if options.input_path.is_dir() {
        controller
            .run_folder(options.input_path.clone(), options.force_overwrite, options.yes)
            .await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

/// Load the configuration file, creating a default one when missing, and
/// layer the CLI overrides on top
fn load_config(
    config_path: &str,
    cmd_log_level: &Option<CliLogLevel>,
    api_url: &Option<String>,
) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = cmd_log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(endpoint) = api_url {
            config.transcription.endpoint = endpoint.clone();
        }

        if let Some(log_level) = cmd_log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(endpoint) = api_url {
            config.transcription.endpoint = endpoint.clone();
        }

        if let Some(log_level) = cmd_log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cmd_log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}
