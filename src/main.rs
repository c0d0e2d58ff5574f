// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, Context};
use log::{error, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use locpipe::app_config::{self, Config, TranslationProvider};
use locpipe::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    /// Same spelling as the `provider` value in the config file
    #[value(name = "mymemory")]
    MyMemory,
    Ollama,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::MyMemory => TranslationProvider::MyMemory,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

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

#[derive(Args, Debug)]
struct MergeArgs {
    /// Localization files or directories to merge, in order
    #[arg(value_name = "INPUT_PATH", required = true)]
    inputs: Vec<PathBuf>,

    /// Folder receiving the merged file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Name of the merged file (".localization" is appended when missing)
    #[arg(short, long, default_value = "merged")]
    name: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge localization files into one document
    Merge(MergeArgs),

    /// Translate a merged localization file
    Translate {
        /// Merged localization file
        #[arg(value_name = "MERGED_FILE")]
        merged: PathBuf,

        /// Folder receiving the translated file (defaults to the merged file's folder)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Merge, then translate the merged file
    Run(MergeArgs),

    /// Check that the translation provider is reachable
    Check,

    /// Generate shell completions for locpipe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// locpipe - localization merge and translation pipeline
///
/// Combines `.localization` JSON documents into one file and machine-translates
/// every string value while keeping protected terms intact.
#[derive(Parser, Debug)]
#[command(name = "locpipe")]
#[command(version)]
#[command(about = "Merge and translate localization files")]
#[command(long_about = "locpipe merges .localization JSON documents and translates the merged strings.

EXAMPLES:
    locpipe merge a.localization b.localization -o out -n merged   # Merge two files
    locpipe merge ./strings -o out                                  # Merge every file in a folder
    locpipe translate out/merged.localization                       # Writes out/translated_merged.localization
    locpipe run ./strings -o out -n merged                          # Merge then translate
    locpipe -p ollama -m llama3.2 run ./strings -o out              # Use a local LLM
    locpipe check                                                   # Probe the configured provider
    locpipe completions bash > locpipe.bash                         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    mymemory  - MyMemory public translation API (default)
    ollama    - Local Ollama server
    anthropic - Anthropic API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Translation provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Source language code (e.g., 'de')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
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

#[tokio::main]
async fn main() {
    // Install the logger at trace so the level chosen later can be raised
    // or lowered with set_max_level alone
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    // Completions need neither config nor provider
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "locpipe", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = load_config(&cli)?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let mut controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Merge(args) => {
            controller.run_merge(&args.inputs, &args.output_dir, &args.name).await?;
        }
        Commands::Translate { merged, output_dir } => {
            controller.run_translate(Some(merged.as_path()), output_dir.as_deref()).await?;
        }
        Commands::Run(args) => {
            controller.run(&args.inputs, &args.output_dir, &args.name).await?;
        }
        Commands::Check => {
            controller.check_connection().await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load or create the configuration, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        config.translation.set_model(model);
    }

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
