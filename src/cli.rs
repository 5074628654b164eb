// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AnimatorConfig;
use crate::error::SceneResult;

#[derive(Parser, Debug, Clone)]
#[command(name = "road-hero")]
#[command(about = "Animated truck hero scene", long_about = None)]
pub struct Cli {
    /// JSON file with scene settings; missing fields use defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Disable the directional light's shadow map
    #[arg(long = "no-shadows", global = true, default_value = "false")]
    pub no_shadows: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the window and run the scene (default)
    Run,
    /// Advance the scene without a window and print the final state as JSON
    Simulate {
        #[arg(long, default_value_t = 600)]
        ticks: u64,
        /// Treat the output as hidden for the whole run
        #[arg(long)]
        hidden: bool,
    },
    /// Check a contact form submission
    Validate {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

impl Cli {
    /// Config file (if any) with command-line overrides applied
    pub fn resolve_config(&self) -> SceneResult<AnimatorConfig> {
        let mut config = match &self.config {
            Some(path) => AnimatorConfig::load(path)?,
            None => AnimatorConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.no_shadows {
            config.shadows.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}
