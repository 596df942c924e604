use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use sml_decoder::capture::{read_capture, split_records};
use sml_decoder::constants::SML_DEFAULT_MAX_DEPTH;
use sml_decoder::logging::{log_debug, log_warn};
use sml_decoder::util::hex::{parse_hex_lenient, pretty_hex};
use sml_decoder::{
    init_logger, log_info, DatagramScanner, DecoderConfig, Framing, SmlDecoder, SmlError, SmlFile,
};

#[derive(Parser)]
#[command(name = "sml-cli")]
#[command(about = "CLI tool for SML smart meter datagrams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a capture file and print its readings
    Decode {
        file: PathBuf,
        #[command(flatten)]
        options: DecodeOptions,
    },
    /// Decode a datagram given as hex on the command line
    Hex {
        data: String,
        #[command(flatten)]
        options: DecodeOptions,
    },
    /// Hex dump of every datagram payload in a capture file
    Dump { file: PathBuf },
}

#[derive(Args)]
struct DecodeOptions {
    /// Input is an already de-framed payload
    #[arg(long)]
    raw: bool,
    /// Split raw input into records of this many bytes
    #[arg(long, requires = "raw")]
    chunk_size: Option<usize>,
    /// Check the crc16 field of every message
    #[arg(long)]
    verify_crc: bool,
    #[arg(long, default_value_t = SML_DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Print readings as JSON lines
    #[arg(long)]
    json: bool,
    /// Print a summary of each file before its readings
    #[arg(long)]
    summary: bool,
}

impl DecodeOptions {
    fn config(&self) -> DecoderConfig {
        let framing = if self.raw {
            Framing::Raw
        } else {
            Framing::Transport
        };
        DecoderConfig::default()
            .with_framing(framing)
            .with_message_crc(self.verify_crc)
            .with_max_depth(self.max_depth)
    }
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { file, options } => {
            let data = read_capture(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            decode(&data, &options)
        }
        Commands::Hex { data, options } => {
            let data = parse_hex_lenient(&data).context("Invalid hex input")?;
            decode(&data, &options)
        }
        Commands::Dump { file } => {
            let data = read_capture(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            for (index, datagram) in DatagramScanner::new(&data).enumerate() {
                match datagram {
                    Ok(payload) => {
                        println!("datagram {index} ({} bytes)", payload.len());
                        println!("{}", pretty_hex(&payload, 16));
                    }
                    Err(err) => log_warn(&format!("datagram {index}: {err}")),
                }
            }
            Ok(())
        }
    }
}

fn decode(data: &[u8], options: &DecodeOptions) -> Result<()> {
    let decoder = SmlDecoder::new(options.config());

    let results: Vec<Result<SmlFile, SmlError>> = if options.raw {
        split_records(data, options.chunk_size.unwrap_or(0))
            .into_iter()
            .map(|record| decoder.decode_payload(record).map_err(SmlError::from))
            .collect()
    } else {
        decoder.decode_stream(data)
    };

    let mut decoded = 0;
    for result in results {
        let file = match result {
            Ok(file) => file,
            Err(err) => {
                log_warn(&format!("Skipping datagram: {err}"));
                continue;
            }
        };
        decoded += 1;

        if options.summary {
            print!("{file}");
        }
        for reading in file.readings() {
            if options.json {
                let line = json!({
                    "obis": reading.obis,
                    "value": reading.formatted_value(),
                    "unit": reading.unit_name(),
                    "kind": reading.kind,
                });
                println!("{}", serde_json::to_string(&line)?);
            } else {
                println!("{reading}");
            }
        }
        log_debug(&format!("{} rejected messages", file.rejected.len()));
    }

    if decoded == 0 {
        bail!("No SML file could be decoded");
    }
    log_info(&format!("Decoded {decoded} SML files"));
    Ok(())
}
