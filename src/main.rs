//! find-dupes CLI
//!
//! List duplicated files, delete redundant copies under a sub-directory,
//! or resolve duplicates one group at a time.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use find_dupes::cross_set::delete_cross_set_with_progress;
use find_dupes::interactive::resolve_interactively;
use find_dupes::listing::read_listing;
use find_dupes::logging::init_logging;
use find_dupes::report::{
    format_cross_set, format_duplicates, format_interactive_summary, format_record,
};
use find_dupes::scanner::{build_index_with_progress, group_duplicates, resolve_nested};
use find_dupes::tui::TerminalSelector;
use find_dupes::types::{CrossSetConfig, DigestIndex, InteractiveConfig, OutputFormat, ScanConfig};

/// Exit status when the run finished but some files could not be read or
/// deleted.
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser)]
#[command(name = "find-dupes")]
#[command(about = "List duplicated files by content and remove redundant copies")]
#[command(version)]
struct Cli {
    /// Directory to scan
    #[arg(required_unless_present = "listing")]
    root: Option<PathBuf>,

    /// Delete copies inside SUBPATH whose content also exists elsewhere under ROOT
    #[arg(
        short = 'D',
        long = "delete-duplicates-in",
        visible_alias = "delete_duplicates_in",
        value_name = "SUBPATH",
        allow_hyphen_values = true,
        conflicts_with_all = ["interactive", "listing", "exclude"]
    )]
    delete_duplicates_in: Option<PathBuf>,

    /// With -D: report what would be deleted, delete nothing
    #[arg(long = "dry-run", visible_alias = "dry", requires = "delete_duplicates_in")]
    dry_run: bool,

    /// Pick, group by group, which copies to delete
    #[arg(short, long, conflicts_with = "format")]
    interactive: bool,

    /// Skip this sub-directory of ROOT while scanning
    #[arg(short = 'x', long, value_name = "SUBPATH", allow_hyphen_values = true)]
    exclude: Option<PathBuf>,

    /// Read `<digest>  <path>` lines (sha256sum/b3sum output) instead of scanning; `-` for stdin
    #[arg(long, value_name = "FILE", conflicts_with_all = ["root", "exclude"])]
    listing: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Pause after each interactive deletion, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 250, requires = "interactive")]
    pause_ms: u64,

    /// More diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors on stderr
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// How a command that did not abort went.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Clean,
    /// Some files could not be read or deleted.
    Partial,
}

impl Outcome {
    fn from_problems(problems: usize) -> Self {
        if problems == 0 { Outcome::Clean } else { Outcome::Partial }
    }
}

/// Flags whose next argument is a value, never a flag.
const VALUE_FLAGS: &[&str] = &[
    "-D",
    "--delete-duplicates-in",
    "--delete_duplicates_in",
    "-x",
    "--exclude",
    "--listing",
    "--format",
    "--pause-ms",
];

/// Rewrite the single-dash `-dry` spelling to `--dry-run`; clap would
/// otherwise read it as `-d -r -y`.
///
/// Only tokens in flag position are rewritten: a value following a flag
/// in [`VALUE_FLAGS`], or anything after `--`, is passed through.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut value_next = false;
    let mut positional_only = false;

    for arg in args {
        if value_next || positional_only {
            value_next = false;
            out.push(arg);
            continue;
        }
        if arg == "--" {
            positional_only = true;
        } else {
            value_next = VALUE_FLAGS.iter().any(|flag| arg == *flag);
        }
        if arg == "-dry" {
            out.push(OsString::from("--dry-run"));
        } else {
            out.push(arg);
        }
    }
    out
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.verbose, cli.quiet);

    let format = OutputFormat::from(cli.format);
    let result = if let Some(subpath) = &cli.delete_duplicates_in {
        cmd_cross_set(&cli, subpath, format)
    } else if cli.interactive {
        cmd_interactive(&cli)
    } else {
        cmd_report(&cli, format)
    };

    match result {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Partial) => ExitCode::from(EXIT_PARTIAL),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run a hashing step with a spinner on stderr (hidden when stderr is not
/// a terminal, or when `show_progress` is false).
///
/// `run` receives the progress callback to hand to the library.
fn with_hash_progress<T, F>(root: &Path, show_progress: bool, run: F) -> Result<T, String>
where
    F: FnOnce(&mut dyn FnMut(usize, usize)) -> find_dupes::Result<T>,
{
    if !show_progress {
        return run(&mut |_, _| {}).map_err(|e| e.to_string());
    }

    let sp = spinner(&format!("Scanning {}...", root.display()));
    let result = run(&mut |done, total| {
        sp.set_message(format!("Hashed {}/{} files...", done, total));
    });
    sp.finish_and_clear();
    result.map_err(|e| e.to_string())
}

// ============================================================================
// INDEX SOURCES
// ============================================================================

/// Build the index from a listing or a live scan, per the CLI flags.
fn load_index(cli: &Cli, show_progress: bool) -> Result<DigestIndex, String> {
    if let Some(listing) = &cli.listing {
        return load_listing(listing);
    }

    let root = cli.root.clone().ok_or("a directory to scan is required")?;
    let config = match &cli.exclude {
        Some(exclude) => {
            let (root, exclude) = resolve_nested(&root, exclude).map_err(|e| e.to_string())?;
            ScanConfig {
                root,
                exclude: Some(exclude),
                ..Default::default()
            }
        }
        None => ScanConfig {
            root,
            ..Default::default()
        },
    };

    with_hash_progress(&config.root, show_progress, |progress| {
        build_index_with_progress(&config, progress)
    })
}

fn load_listing(path: &Path) -> Result<DigestIndex, String> {
    let result = if path == Path::new("-") {
        read_listing(io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        read_listing(file)
    };
    result.map_err(|e| e.to_string())
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_report(cli: &Cli, format: OutputFormat) -> Result<Outcome, String> {
    let index = load_index(cli, format == OutputFormat::Human)?;
    let set = group_duplicates(&index);

    print!("{}", format_duplicates(&set, format).map_err(|e| e.to_string())?);

    Ok(Outcome::from_problems(set.skipped.len()))
}

fn cmd_cross_set(cli: &Cli, subpath: &Path, format: OutputFormat) -> Result<Outcome, String> {
    let root = cli.root.as_deref().ok_or("a directory to scan is required")?;
    let config = CrossSetConfig {
        subpath: subpath.to_path_buf(),
        dry_run: cli.dry_run,
    };

    let report = with_hash_progress(root, format == OutputFormat::Human, |progress| {
        delete_cross_set_with_progress(root, &config, progress)
    })?;

    print!("{}", format_cross_set(&report, format).map_err(|e| e.to_string())?);

    Ok(Outcome::from_problems(
        report.skipped.len() + report.failures().count(),
    ))
}

fn cmd_interactive(cli: &Cli) -> Result<Outcome, String> {
    if !io::stdout().is_terminal() {
        return Err("interactive mode needs a terminal".to_string());
    }

    let index = load_index(cli, true)?;
    let set = group_duplicates(&index);

    print!("{}", format_duplicates(&set, OutputFormat::Human).map_err(|e| e.to_string())?);

    if set.is_empty() {
        return Ok(Outcome::from_problems(set.skipped.len()));
    }

    let config = InteractiveConfig {
        pause: Duration::from_millis(cli.pause_ms),
    };
    let mut selector = TerminalSelector::new();

    println!();
    let report = resolve_interactively(&set, &mut selector, &config, |record| {
        println!("{}", format_record(record));
    })
    .map_err(|e| e.to_string())?;

    println!();
    print!("{}", format_interactive_summary(&report));

    Ok(Outcome::from_problems(set.skipped.len() + report.failed()))
}

// ============================================================================
// TESTS
// ============================================================================
