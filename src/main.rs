//! typing-log - record and analyze typing logs
//!
//! `analyze` reads encoded typing logs (one per line) from a file or stdin
//! and prints an accuracy and speed report for each. `record` replays timed
//! input-field snapshots through the input model and prints the encoded log.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use typing_log::{log::codec, AnalysisReport, Config, InputModel, Language, LogAnalyzer, ManualClock};

#[derive(Parser)]
#[command(name = "typing-log")]
#[command(about = "Record and analyze typing logs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an accuracy and speed report for each encoded log
    Analyze {
        /// Print each report as JSON
        #[arg(long)]
        json: bool,
        /// Number of text segments to report speeds for
        #[arg(long)]
        segments: Option<usize>,
        /// One encoded log per line (stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Build a typing log from timed input-field snapshots
    Record {
        /// Text being typed
        #[arg(short, long)]
        text: String,
        /// Language code of the text
        #[arg(short, long)]
        language: Option<String>,
        /// Accept input only once a whole word and its delimiter are typed
        #[arg(long)]
        word_mode: bool,
        /// One `<ms><TAB><snapshot>` line per update (stdin if omitted)
        file: Option<PathBuf>,
    },
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

/// Prints a report per log line, returning the number of lines that failed
/// to parse.
fn analyze(input: impl BufRead, out: &mut impl Write, json: bool, segment_count: usize) -> Result<usize> {
    debug!("analyzing with {segment_count} segments");
    let mut failures = 0;

    for (number, line) in input.lines().enumerate() {
        let line = line.context("error reading input")?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let number = number + 1;

        let log = match codec::parse(line) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("line {number}: {e}");
                failures += 1;
                continue;
            }
        };
        let analyzer = LogAnalyzer::new(log);
        let report = AnalysisReport::new(&analyzer, segment_count)?;

        if json {
            writeln!(out, "{}", report.to_json()?)?;
        } else {
            writeln!(out, "== line {number}: {:?}", analyzer.log().text())?;
            write!(out, "{}", report.to_text())?;
        }
    }
    Ok(failures)
}

/// Drives an input model with recorded snapshots and writes the encoded log.
fn record(
    input: impl BufRead,
    out: &mut impl Write,
    text: String,
    language: Language,
    accept_prefixes: bool,
) -> Result<()> {
    let mut model = InputModel::new(text, language, accept_prefixes)?;
    let clock = ManualClock::new();
    model.start_timing(Box::new(clock.clone()))?;

    for (number, line) in input.lines().enumerate() {
        let line = line.context("error reading input")?;
        let number = number + 1;
        let (ms, snapshot) = line
            .trim_end_matches('\r')
            .split_once('\t')
            .with_context(|| format!("line {number}: expected <ms><TAB><snapshot>"))?;
        let ms = ms
            .trim()
            .parse()
            .with_context(|| format!("line {number}: invalid time {ms:?}"))?;
        clock.set(ms);
        if model.update(snapshot)?.is_none() {
            debug!("text already finished, ignoring line {number}");
        }
    }
    if !model.is_finished() {
        warn!(
            "input ended at char {} of {}",
            model.char_cursor(),
            model.text().chars().count()
        );
    }
    writeln!(out, "{}", model.typing_log())?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("using default config: {e}");
        Config::default()
    });

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Analyze {
            json,
            segments,
            file,
        } => {
            let input = open_input(file.as_ref())?;
            let segment_count = segments.unwrap_or(config.analysis.segment_count);
            let failures = analyze(input, &mut out, json, segment_count)?;
            out.flush()?;
            if failures > 0 {
                anyhow::bail!("{failures} line(s) could not be parsed");
            }
        }
        Commands::Record {
            text,
            language,
            word_mode,
            file,
        } => {
            let language = match language {
                Some(code) => Language::from_code(&code)
                    .with_context(|| format!("unknown language code: {code}"))?,
                None => config.default_language()?,
            };
            let accept_prefixes = config.input.accept_prefixes && !word_mode;
            let input = open_input(file.as_ref())?;
            record(input, &mut out, text, language, accept_prefixes)?;
            out.flush()?;
        }
    }
    Ok(())
}
