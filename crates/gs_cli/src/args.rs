// crates/gs_cli/src/args.rs
//
// CLI argument surface (types + post-parse checks).
//
// - INPUT and --config must be existing regular files
// - --out is a directory (created on demand), never an existing file
// - --format [yaml|json|text]*, default yaml + text
// - Seed accepts u64 decimal or 0x-hex
// - Flags override values from --config

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use gs_report::ReportFormat;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "giftsplit",
    version,
    disable_help_subcommand = true,
    about = "Split gift links across recipients under a per-person budget"
)]
pub struct Args {
    /// Gift list: YAML sequence or JSON array of {Imię, Link, Cena}.
    pub input: PathBuf,

    /// Params file (YAML or JSON): max_price, link_count_weight, child_marker, seed.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory (created if missing).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Output format(s). Repeatable. Omit for yaml + text.
    #[arg(long, value_parser = ["yaml", "json", "text"])]
    pub format: Vec<String>,

    /// Per-recipient budget ceiling in whole złoty.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_price: Option<u64>,

    /// RNG seed. Accepts decimal u64 or 0x-hex (≤16 hex digits).
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Fail on rows whose price cannot be parsed instead of skipping them.
    #[arg(long)]
    pub strict_prices: bool,

    /// Load and check the input only, do not allocate or write anything.
    #[arg(long)]
    pub validate_only: bool,

    /// Errors only on stderr.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More log output (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Requested formats, deduplicated, in a fixed order.
    pub fn formats(&self) -> Vec<ReportFormat> {
        if self.format.is_empty() {
            return vec![ReportFormat::Yaml, ReportFormat::Text];
        }
        let set: BTreeSet<ReportFormat> = self
            .format
            .iter()
            .filter_map(|f| match f.as_str() {
                "yaml" => Some(ReportFormat::Yaml),
                "json" => Some(ReportFormat::Json),
                "text" => Some(ReportFormat::Text),
                _ => None,
            })
            .collect();
        set.into_iter().collect()
    }
}

/// Why the arguments were refused after clap accepted them.
#[derive(Debug)]
pub enum CliError {
    NotAFile { flag: &'static str, path: PathBuf },
    OutIsFile(PathBuf),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NotAFile { flag, path } => write!(f, "file not found: {flag} {}", path.display()),
            CliError::OutIsFile(path) => write!(f, "--out must be a directory: {}", path.display()),
        }
    }
}
impl std::error::Error for CliError {}

/// `--seed` value: plain decimal, or `0x`/`0X` followed by hex digits.
pub fn parse_seed(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    let (digits, radix) = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (raw, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("`{raw}` is not a decimal or 0x-hex u64"));
    }
    u64::from_str_radix(digits, radix).map_err(|_| format!("`{raw}` does not fit in u64"))
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

fn validate(args: Args) -> Result<Args, CliError> {
    require_file(&args.input, "INPUT")?;
    if let Some(cfg) = &args.config {
        require_file(cfg, "--config")?;
    }
    if args.out.is_file() {
        return Err(CliError::OutIsFile(args.out.clone()));
    }
    Ok(args)
}

fn require_file(path: &Path, flag: &'static str) -> Result<(), CliError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotAFile { flag, path: path.to_path_buf() }),
    }
}
