use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use xbdec_core::{DecodeError, ProtocolRecord, detect_variant};

#[derive(Parser, Debug)]
#[command(name = "xbdec")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("XBDEC_BUILD_COMMIT"), " ", env!("XBDEC_BUILD_DATE"), ")"
))]
#[command(
    about = "Decoder for XB vending-terminal protocol captures (consumption records, QR payment).",
    long_about = None,
    after_help = "Examples:\n  xbdec decode \"55 aa 01 02 ...\"\n  xbdec decode --file capture.hex --variant qr-request -o record.json\n  cat capture.hex | xbdec decode --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a hex capture and emit the structured record as JSON.
    Decode {
        /// Hex capture text; spaces, newlines, and 0x markers are tolerated
        hex: Option<String>,

        /// Read the capture from a file (falls back to stdin when neither
        /// this nor the positional argument is given)
        #[arg(short = 'f', long, conflicts_with = "hex")]
        file: Option<PathBuf>,

        /// Protocol variant to decode
        #[arg(long, value_enum, default_value = "auto")]
        variant: VariantArg,

        /// Output record path (JSON); defaults to stdout
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    /// Sniff the QR markers, falling back to a consumption record
    Auto,
    Consumption,
    QrRequest,
    QrResponse,
    /// QR request/response pair with marker-based dispatch
    Qr,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            hex,
            file,
            variant,
            report,
            pretty,
            compact: _,
            quiet,
        } => cmd_decode(hex, file, variant, report, pretty, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_decode(
    hex: Option<String>,
    file: Option<PathBuf>,
    variant: VariantArg,
    report: Option<PathBuf>,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = read_input(hex, file)?;
    if xbdec_core::hex::clean(&input).is_empty() {
        return Err(CliError::new(
            "no hex data in input",
            Some("pass a hex string, use --file, or pipe to stdin".to_string()),
        ));
    }

    let record = decode_with(variant, &input).map_err(decode_cli_error)?;
    let json = serialize_record(&record, pretty)?;

    let Some(report) = report else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write record: {}", report.display()))?;
    if !quiet {
        eprintln!("OK: record written -> {}", report.display());
    }
    Ok(())
}

fn read_input(hex: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(hex) = hex {
        return Ok(hex);
    }
    if let Some(path) = file {
        if !path.exists() {
            return Err(CliError::new(
                format!("input file not found: {}", path.display()),
                Some("pass a file holding the hex capture text".to_string()),
            ));
        }
        return Ok(fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read hex data from stdin")?;
    Ok(buffer)
}

fn decode_with(variant: VariantArg, input: &str) -> Result<ProtocolRecord, DecodeError> {
    match variant {
        VariantArg::Auto => detect_variant(input).decode(input),
        VariantArg::Consumption => xbdec_core::decode_consumption(input),
        VariantArg::QrRequest => xbdec_core::decode_qr_request(input),
        VariantArg::QrResponse => xbdec_core::decode_qr_response(input),
        VariantArg::Qr => xbdec_core::decode_qr(input),
    }
}

fn decode_cli_error(err: DecodeError) -> CliError {
    let hint = match &err {
        DecodeError::TooShort { .. } => {
            Some("the cleaned capture is below the variant's minimum frame size".to_string())
        }
        DecodeError::WrongVariant { .. } | DecodeError::Dispatch { .. } => {
            Some("try --variant auto or select another variant".to_string())
        }
        DecodeError::Hex(_) => None,
    };
    CliError::new(err.to_string(), hint)
}

fn serialize_record(record: &ProtocolRecord, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(record)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(record)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}
