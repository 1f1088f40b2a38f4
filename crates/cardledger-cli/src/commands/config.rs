//! Config command - inspect and validate engine configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use cardledger_core::statement::CategoryRule;
use cardledger_core::EngineConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration and where it came from
    Show,

    /// Validate a configuration file, reporting every invalid category rule
    Check,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "grammar.max_continuation_lines")
        key: String,
    },
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

/// `--config` wins over the per-user default location.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Check => check_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardledger")
        .join("config.json")
}

fn load(path: &Path) -> anyhow::Result<EngineConfig> {
    if path.exists() {
        Ok(EngineConfig::from_file(path)?)
    } else {
        Ok(EngineConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());
    if path.exists() {
        println!("Status: {}", style("loaded").green());
    } else {
        println!("Status: {}", style("not found, using defaults").yellow());
        println!("Run 'cardledger config init' to create a configuration file.");
    }
    println!();

    let config = load(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    println!();
    println!(
        "Built-in category rules: {}",
        if config.categories.use_builtin_rules {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Extra category rules: {}", config.categories.extra_rules.len());

    Ok(())
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    // Parse without the engine's own check so every problem is listed,
    // not just the first.
    let content = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("{}: not a valid configuration: {}", path.display(), e))?;

    let mut problems = Vec::new();
    if let Err(e) = config.check() {
        problems.push(e.to_string());
    }
    for (index, rule) in config.categories.extra_rules.iter().enumerate() {
        if let Err(e) = CategoryRule::new(&rule.pattern, rule.category.as_str(), rule.priority) {
            problems.push(format!("categories.extra_rules[{}]: {}", index, e));
        }
    }

    if problems.is_empty() {
        println!(
            "{} {} is valid ({} extra category rules)",
            style("✓").green(),
            path.display(),
            config.categories.extra_rules.len()
        );
        return Ok(());
    }

    for problem in &problems {
        eprintln!("{} {}", style("✗").red(), problem);
    }
    anyhow::bail!("{} problem(s) in {}", problems.len(), path.display())
}

fn init_config(args: InitArgs, path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    EngineConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load(path)?)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}
