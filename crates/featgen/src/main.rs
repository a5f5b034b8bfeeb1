//! Feature Generation - Command-line Entry Point
//!
//! Reads one sample per line (sequences of a sample joined by the separator)
//! and writes the string or Fisher feature matrix for the downstream
//! classifier.

mod output;
mod settings;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kmer_features::FeatureGenerator;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use output::{write_table, FeatureTable, OutputFormat};
use settings::Overrides;

#[derive(Parser)]
#[command(name = "featgen")]
#[command(version)]
#[command(about = "Generate string or Fisher feature matrices from pooled sequence samples")]
#[command(after_help = r#"
Configuration is merged from (lowest precedence first): built-in defaults,
--config FILE, FEATGEN_* environment variables, command-line flags.
"#)]
struct Args {
    /// Samples, one per line (stdin when omitted)
    #[arg(short, long, value_name = "FILE", help_heading = "Input")]
    input: Option<PathBuf>,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE", help_heading = "Input")]
    config: Option<PathBuf>,

    /// Symbols k-mers are drawn from
    #[arg(short, long, help_heading = "Features")]
    alphabet: Option<String>,

    /// Substring length
    #[arg(short, long, help_heading = "Features")]
    p: Option<usize>,

    /// Feature family: string or fisher
    #[arg(short = 't', long = "feature-type", help_heading = "Features")]
    feature_type: Option<String>,

    /// Transition depth (only 1 is supported)
    #[arg(long = "n-transition", help_heading = "Features")]
    n_transition: Option<usize>,

    /// Prune transitions with probability below this value
    #[arg(long = "threshold", help_heading = "Features")]
    proba_threshold: Option<f64>,

    /// Separator between sequences inside a sample
    #[arg(short, long, help_heading = "Features")]
    separator: Option<char>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE", help_heading = "Output")]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "json", help_heading = "Output")]
    format: OutputFormat,

    /// Per-sample progress and debug logging
    #[arg(short, long, help_heading = "Output")]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            alphabet: self.alphabet.clone(),
            p: self.p,
            feature_type: self.feature_type.clone(),
            n_transition: self.n_transition,
            proba_threshold: self.proba_threshold,
            separator: self.separator,
        }
    }
}

/// Initialize logging on stderr
fn init_logging(verbose: bool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// One sample per line; a trailing carriage return is dropped
fn read_samples<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .map(|line| {
            line.map(|l| l.trim_end_matches('\r').to_string())
                .context("Failed to read sample line")
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let mut config = settings::load(args.config.as_deref(), &args.overrides())
        .context("Failed to load configuration")?;
    config.verbose |= args.verbose;

    let samples = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_samples(BufReader::new(file))?
        }
        None => read_samples(io::stdin().lock())?,
    };
    info!("Loaded {} samples", samples.len());

    let mut generator = FeatureGenerator::new(config).context("Invalid feature configuration")?;
    let features = generator.process(&samples)?;
    info!(
        "Generated {} x {} {} feature matrix",
        features.nrows(),
        features.ncols(),
        generator.config().feature_type
    );

    let table = FeatureTable::new(generator.feature_names(), &features);
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_table(&mut writer, &table, args.format)?;

    Ok(())
}
