use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::{mask_secret, Config};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        let key = config
                            .api_key
                            .value
                            .as_deref()
                            .map(mask_secret)
                            .unwrap_or_else(|| "(not set)".to_string());
                        println!("api_key: {}", key);
                        println!("  source: {}", config.api_key.source);
                        println!();

                        println!("model: {}", config.model.value);
                        println!("  source: {}", config.model.source);
                        println!();

                        println!("base_url: {}", config.base_url.value);
                        println!("  source: {}", config.base_url.source);
                        println!();

                        println!("daily_goal: {} kcal", config.daily_goal.value);
                        println!("  source: {}", config.daily_goal.source);
                        println!();

                        println!("request_timeout_secs: {}", config.request_timeout_secs.value);
                        println!("  source: {}", config.request_timeout_secs.source);
                        println!();

                        println!("retry_backoff_ms: {}", config.retry_backoff_ms.value);
                        println!("  source: {}", config.retry_backoff_ms.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'fitpal config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let default_config = r#"# fitpal configuration

# API key for the Gemini API (or set FITPAL_API_KEY)
# api_key: your-key-here

# Model used for calorie estimates
model: gemini-2.5-flash

# Daily calorie goal in kcal
daily_goal: 2000

# Seconds to wait for a single estimate request
request_timeout_secs: 30

# Milliseconds to wait before retrying a failed request
retry_backoff_ms: 500
"#;

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
