//! # Steganographer Binary Entry Point
//!
//! Thin wrapper around the library: reads a PNG, then either hides a message
//! in it or prints the message hidden in it.
//!
//! ## Usage
//!
//! ```bash
//! # Hide a message, writing photo_encoded.png next to the input
//! cargo run -- photo.png --encode "meet at noon"
//!
//! # Read it back
//! cargo run -- photo_encoded.png
//! ```
//!
//! Without `--encode` the image is decoded.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};

use steganographer::config::StegoConfig;
use steganographer::image_io;
use steganographer::naming::make_output_filename;
use steganographer::stego::{decode_with_report, encode_with_report};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the image (PNG format) to be processed
    image: PathBuf,

    /// Encode the message ENCODE in the image. If this option is not used,
    /// decoding will occur
    #[arg(short, long)]
    encode: Option<String>,

    /// Where to write the encoded image (default: <image>_encoded.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel values per pixel (overrides the configuration file)
    #[arg(long)]
    channels: Option<usize>,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => StegoConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => StegoConfig::default(),
    };
    if let Some(channels) = args.channels {
        config.image.channels = Some(channels);
        config.validate()?;
    }

    init_logger(config.logging.level_filter()?);

    let grid = image_io::read(&args.image, config.image.channels)
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    info!(
        "Read {} ({}x{}, {} channels, room for {} characters)",
        args.image.display(),
        grid.width(),
        grid.height(),
        grid.channels(),
        grid.max_message_len()
    );

    match args.encode {
        Some(message) => {
            let output = args
                .output
                .unwrap_or_else(|| make_output_filename(&args.image, &config.output.suffix));

            let report = encode_with_report(&grid, &message).context("Failed to encode message")?;
            image_io::write(&report.grid, &output)
                .with_context(|| format!("Failed to write image {}", output.display()))?;

            if args.json {
                let summary = serde_json::json!({
                    "output": output.display().to_string(),
                    "message_bits": report.message_bits,
                    "embedded_bits": report.embedded_bits,
                    "capacity": report.capacity,
                    "truncated": report.truncated(),
                    "terminated": report.terminated,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Encoded your message to {}", output.display());
            }
        }
        None => {
            let decoded = decode_with_report(&grid).context("Failed to decode image")?;

            if args.json {
                let summary = serde_json::json!({
                    "image": args.image.display().to_string(),
                    "message": decoded.message,
                    "terminated": decoded.terminated,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "The file {} is encoded with the message:\n\n{}",
                    args.image.display(),
                    decoded.message
                );
            }
        }
    }

    Ok(())
}
