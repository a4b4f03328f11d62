use clap::Parser;
use pricing_codec::config::Command;
use pricing_codec::domain::ports::Storage;
use pricing_codec::utils::error::{CodecError, ErrorSeverity, Result};
use pricing_codec::utils::logger;
use pricing_codec::{CliConfig, LocalStorage, PriceFieldCodec};
use std::io::{Read, Write};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ pricing-codec failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        if let Some(violations) = e.violations() {
            for violation in violations {
                eprintln!("  {}", violation);
            }
        }
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let codec = PriceFieldCodec::new(config.codec_config()?);
    let storage = LocalStorage::new(".".to_string());

    let input = read_input(&storage, config.command.input())?;

    let output = match &config.command {
        Command::Encode { .. } => {
            match codec.encode_json(&input)? {
                Some(stored) => stored,
                None => "null".to_string(),
            }
        }
        Command::Decode { .. } => {
            let stored = String::from_utf8(input).map_err(|e| CodecError::malformed(e.to_string()))?;
            let collection = codec.decode(&stored)?;
            serde_json::to_string_pretty(&collection)?
        }
    };

    match config.command.output() {
        Some(path) => {
            storage.write_file(path, output.as_bytes())?;
            tracing::info!("✅ Output saved to: {}", path);
        }
        None => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", output)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn read_input(storage: &LocalStorage, input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    tracing::debug!("Reading input from: {}", input);
    storage.read_file(input)
}
