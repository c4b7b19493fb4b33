//! CLI definition and run handler

use crate::config::{
    load_config_file, load_project_config, parse_freq_dist, FreqScope, Library, OnError, RunConfig,
    UnknownLevelPolicy,
};
use crate::nlp::{Lexicon, RuleSegmenter, RuleTagger};
use crate::pipeline::{collect_documents, Pipeline, RunOutput};
use crate::reporters;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Multi-letter single-dash spellings and the long flags they stand for
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-pt", "--pos_tags"),
    ("-ps", "--pos_stats"),
    ("-fd", "--freq_dist"),
];

/// Parse a `0|1` switch
fn parse_switch(s: &str) -> Result<bool, String> {
    match s.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => parse_bool(other).map_err(|_| format!("'{}' is not 0 or 1", s)),
    }
}

/// Parse a boolean flag value
fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(format!("'{}' is not a boolean (true/false)", s)),
    }
}

/// Validate a `--freq_dist` value, keeping the raw string
fn parse_freq_dist_arg(s: &str) -> Result<String, String> {
    parse_freq_dist(s).map(|_| s.to_string())
}

/// Parse a row count (at least 1)
fn parse_top(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("top must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

fn parse_choice<T: FromStr<Err = String>>(s: &str) -> Result<T, String> {
    s.parse()
}

/// cefr-pos - POS tagging of CEFR-levelled documents
#[derive(Parser, Debug)]
#[command(name = "cefr-pos")]
#[command(
    version,
    about = "POS-tag CEFR-levelled documents and build per-level tag matrices and frequency tables",
    long_about = "Reads plain-text documents whose file names carry a CEFR level token \
(_A1_, _A2_, _B1_, _B1Plus_, _B2_, _C1_, _C2_), tags every sentence with Penn Treebank \
part-of-speech tags and aggregates the results per level.",
    after_help = "\
Examples:
  cefr-pos -i texts/ -o out/                       Per-document tagged JSON
  cefr-pos -i texts/ -o out/ -pt 0 -ps true        Only pos_matrix.csv
  cefr-pos -i texts/ -o out/ -fd words --top 20    Word frequencies per level
  cefr-pos -i texts/ -o out/ -ps true --unknown-level bucket

Model data: set CEFR_POS_DATA (or --model-dir) to a directory containing lexicon.tsv."
)]
pub struct Cli {
    /// Directory of input text documents
    #[arg(short = 'i', long = "dir_in", value_name = "DIR")]
    pub dir_in: PathBuf,

    /// Directory for output files (created if absent)
    #[arg(short = 'o', long = "dir_out", value_name = "DIR")]
    pub dir_out: PathBuf,

    /// Tagging backend: nltk (built-in) or spacy (not available)
    #[arg(short = 'l', long, default_value = "nltk", value_parser = parse_choice::<Library>)]
    pub library: Library,

    /// Write per-document JSON with tagged sentences (0 or 1)
    #[arg(long = "pos_tags", default_value = "1", action = ArgAction::Set, value_parser = parse_switch)]
    pub pos_tags: bool,

    /// Write pos_matrix.csv with per-level tag lists
    #[arg(
        long = "pos_stats",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = parse_bool
    )]
    pub pos_stats: bool,

    /// Frequency distribution per level: words, pos, or "" for none
    #[arg(long = "freq_dist", default_value = "", value_parser = parse_freq_dist_arg)]
    pub freq_dist: String,

    /// Directory containing lexicon.tsv
    #[arg(long, env = "CEFR_POS_DATA", value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Documents without a level token: fail or bucket (as UNKNOWN)
    #[arg(long, value_parser = parse_choice::<UnknownLevelPolicy>)]
    pub unknown_level: Option<UnknownLevelPolicy>,

    /// On a per-document error: abort or skip
    #[arg(long, value_parser = parse_choice::<OnError>)]
    pub on_error: Option<OnError>,

    /// Frequency report levels: all, or first (first level with data)
    #[arg(long, value_parser = parse_choice::<FreqScope>)]
    pub freq_scope: Option<FreqScope>,

    /// Rows per level in frequency reports
    #[arg(long, value_parser = parse_top)]
    pub top: Option<usize>,

    /// Config file (default: cefr-pos.toml in the input directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

/// Rewrite `-pt`/`-ps`/`-fd` (and their `=value` forms) to long flags.
///
/// Arguments after `--` are left alone.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if after_separator {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                after_separator = true;
                return arg;
            }
            for (short, long) in LEGACY_FLAGS {
                if s == *short {
                    return OsString::from(*long);
                }
                if let Some(value) = s.strip_prefix(short).and_then(|r| r.strip_prefix('=')) {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}

/// Resolve defaults < config file < CLI flags
fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = RunConfig::new(&cli.dir_in, &cli.dir_out);

    let project = match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => load_project_config(&cli.dir_in),
    };
    config.apply_project_config(&project);

    config.library = cli.library;
    config.pos_tags = cli.pos_tags;
    config.modes.pos_stats = cli.pos_stats;
    config.modes.freq_dist = parse_freq_dist(&cli.freq_dist).map_err(anyhow::Error::msg)?;
    if let Some(dir) = &cli.model_dir {
        config.model_dir = dir.clone();
    }
    if let Some(policy) = cli.unknown_level {
        config.unknown_level = policy;
    }
    if let Some(on_error) = cli.on_error {
        config.on_error = on_error;
    }
    if let Some(scope) = cli.freq_scope {
        config.freq_scope = scope;
    }
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    Ok(config)
}

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ")
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    config.validate()?;

    let lexicon = Lexicon::from_model_dir(&config.model_dir)
        .context("Failed to load tagging model data (set CEFR_POS_DATA or --model-dir)")?;
    info!(
        "Loaded {} lexicon entries from {}",
        lexicon.len(),
        config.model_dir.display()
    );
    let tagger = RuleTagger::new(lexicon);
    let segmenter = RuleSegmenter::new();

    let files = collect_documents(&config.dir_in, &config.extensions)?;
    info!(
        "Found {} documents in {}",
        files.len(),
        config.dir_in.display()
    );

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(create_bar_style());
    bar.set_message("Tagging documents...");

    let output = Pipeline::new(&config, &segmenter, &tagger)
        .with_progress(bar.clone())
        .run(&files);
    bar.finish_and_clear();
    let output = output
        .with_context(|| format!("Failed to process documents in {}", config.dir_in.display()))?;

    print_summary(&output, &config);
    Ok(())
}

fn print_summary(output: &RunOutput, config: &RunConfig) {
    if let Some(report) = &output.freq {
        print!("{}", reporters::render_freq_report(report));
    }

    println!(
        "\n{}Tagged {}",
        style("✓ ").green(),
        style(output.stats.summary()).bold()
    );
    for path in &output.stats.skipped {
        println!("  {} skipped {}", style("!").yellow(), path.display());
    }
    println!(
        "  {} files written to {}",
        style(output.written.len()).cyan(),
        style(config.dir_out.display()).dim()
    );
}
