use clap::{CommandFactory, Parser, ValueEnum};
use rawmail::fs_utils::{read_file_contents, resolve_marker_path};
use rawmail::{ExpandConfig, OutputRecord, Result, expand, find_markers};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info, warn};

const LONG_HELP: &str = r#"
Markers:
  filename="parts/body.txt"   - Replaced by the contents of parts/body.txt

Only the root document is scanned. Markers inside included files are copied
as-is. Every marker is read each time it occurs, and any unreadable file
aborts the run with nothing written.

Examples:
  # Expand and print {"Data": "..."}
  rawmail mail.txt
  # Resolve marker paths against another directory
  rawmail mail.txt --base-dir ./attachments
  # Check every referenced file exists
  rawmail mail.txt --dry-run
  # List markers, as JSON for scripting
  rawmail mail.txt --list=json
  # Save output to file
  rawmail mail.txt -o payload.json
"#;

/// Expand filename="..." markers and wrap the result as {"Data": ...}.
#[derive(Parser, Debug)]
#[command(
    name = "rawmail",
    version,
    about = "Expand filename=\"...\" markers and wrap the result as {\"Data\": ...}.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Root document to expand
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// Base directory for resolving marker file names
    #[arg(short, long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Check that every referenced file exists without reading it
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// List markers in the document (optionally with format: plain, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain", conflicts_with = "dry_run")]
    list: Option<ListFormat>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// One file name per line
    Plain,
    /// JSON output for scripting
    Json,
}

#[derive(Serialize)]
struct MarkerInfo {
    marker: String,
    filename: String,
    start: usize,
    end: usize,
    path: String,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.quiet, cli.verbose);

    let Some(document_path) = cli.document.clone() else {
        println!("{}", Cli::command().render_usage());
        std::process::exit(1);
    };

    let config = ExpandConfig {
        base_dir: cli.base_dir.clone(),
    };

    let result = if cli.dry_run {
        dry_run(&document_path, &config)
    } else if let Some(list_format) = cli.list {
        list_markers(&document_path, list_format, &config)
    } else {
        run_expand(&document_path, cli.output.as_deref(), &config)
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr so stdout carries only the JSON line
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_document(path: &Path) -> Result<String> {
    info!(path = %path.display(), "reading root document");
    read_file_contents(path)
}

fn run_expand(document_path: &Path, output: Option<&Path>, config: &ExpandConfig) -> Result<bool> {
    let document = load_document(document_path)?;
    let record = OutputRecord::new(expand(&document, config)?);

    if let Some(output_path) = output {
        info!(path = %output_path.display(), "writing output");
        record.write_json_line(File::create(output_path)?)?;
    } else {
        record.write_json_line(io::stdout().lock())?;
    }

    Ok(true)
}

fn dry_run(document_path: &Path, config: &ExpandConfig) -> Result<bool> {
    let document = load_document(document_path)?;
    let markers = find_markers(&document)?;

    let mut valid_count = 0;
    let mut invalid_count = 0;

    for marker in &markers {
        let path = resolve_marker_path(&marker.filename, config.base_dir.as_deref());
        if path.is_file() {
            info!("✓ {} -> {}", marker.full_match, path.display());
            valid_count += 1;
        } else if path.exists() {
            error!("✗ {} -> {} (not a file)", marker.full_match, path.display());
            invalid_count += 1;
        } else {
            warn!("✗ {} -> {} (not found)", marker.full_match, path.display());
            invalid_count += 1;
        }
    }

    println!("Summary: {} markers found", markers.len());
    if valid_count > 0 {
        println!("  ✓ {valid_count} valid");
    }
    if invalid_count > 0 {
        println!("  ✗ {invalid_count} invalid");
    }

    Ok(invalid_count == 0)
}

fn list_markers(document_path: &Path, format: ListFormat, config: &ExpandConfig) -> Result<bool> {
    let document = load_document(document_path)?;
    let markers = find_markers(&document)?;

    match format {
        ListFormat::Plain => {
            for marker in &markers {
                println!("{}", marker.filename);
            }
        }
        ListFormat::Json => {
            let infos: Vec<MarkerInfo> = markers
                .iter()
                .map(|marker| MarkerInfo {
                    marker: marker.full_match.clone(),
                    filename: marker.filename.clone(),
                    start: marker.start,
                    end: marker.end,
                    path: resolve_marker_path(&marker.filename, config.base_dir.as_deref())
                        .display()
                        .to_string(),
                })
                .collect();

            let json = serde_json::to_string_pretty(&infos)?;
            println!("{json}");
        }
    }

    Ok(true)
}
