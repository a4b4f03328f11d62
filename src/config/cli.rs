use crate::config::toml_config::{CodecConfig, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{PathStyle, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pricing-codec")]
#[command(about = "Encode and decode per-currency price fields")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the default currency id from config
    #[arg(long, global = true)]
    pub default_currency: Option<String>,

    /// Override the field path used in violation messages
    #[arg(long, global = true)]
    pub field: Option<String>,

    #[arg(long, global = true, value_parser = parse_path_style)]
    pub path_style: Option<PathStyle>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Authoring JSON -> storage JSON
    Encode {
        /// Input file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Storage JSON -> typed price collection
    Decode {
        #[arg(short, long, default_value = "-")]
        input: String,

        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Command {
    pub fn input(&self) -> &str {
        match self {
            Command::Encode { input, .. } | Command::Decode { input, .. } => input,
        }
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Command::Encode { output, .. } | Command::Decode { output, .. } => output.as_deref(),
        }
    }
}

fn parse_path_style(value: &str) -> std::result::Result<PathStyle, String> {
    match value {
        "pointer" => Ok(PathStyle::Pointer),
        "dotted" => Ok(PathStyle::Dotted),
        other => Err(format!("unknown path style '{}', expected pointer or dotted", other)),
    }
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋
    pub fn codec_config(&self) -> Result<CodecConfig> {
        let mut codec = match &self.config {
            Some(path) => {
                tracing::debug!("Loading codec configuration from: {}", path);
                TomlConfig::from_file(path)?.codec
            }
            None => CodecConfig::default(),
        };

        if let Some(currency) = &self.default_currency {
            codec.default_currency = currency.clone();
        }
        if let Some(field) = &self.field {
            codec.field_path = field.clone();
        }
        if let Some(style) = self.path_style {
            codec.path_style = style;
        }

        codec.validate()?;
        Ok(codec)
    }
}
