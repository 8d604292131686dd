use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use help_index_pipeline::config::IndexConfig;
use help_index_pipeline::report::RunSummary;
use help_index_pipeline::{
    DEFAULT_CHECKLIST_PATH, DEFAULT_HTML_PATH, DEFAULT_INDEX_PATH, DEFAULT_MAPPING_PATH,
    RunOptions,
};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "help-index")]
#[command(about = "Turn a plain-text help index into an HTML page and a file checklist")]
#[command(version)]
struct Cli {
    /// Help index to read.
    #[arg(long, default_value = DEFAULT_INDEX_PATH)]
    index: PathBuf,
    /// Mapping list of image and document paths.
    #[arg(long, default_value = DEFAULT_MAPPING_PATH)]
    mapping: PathBuf,
    /// HTML page to write.
    #[arg(long, default_value = DEFAULT_HTML_PATH)]
    html: PathBuf,
    /// Checklist of referenced files to write.
    #[arg(long, default_value = DEFAULT_CHECKLIST_PATH)]
    checklist: PathBuf,
    /// Also write the resolved document as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
    /// YAML configuration file (built-in defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum similarity (0.0-1.0, exclusive) for an entry to link a file.
    #[arg(long)]
    min_score: Option<f64>,
    /// Mark referenced files that do not exist next to the HTML page.
    #[arg(long)]
    check_files: bool,
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => IndexConfig::load(path).map_err(|err| err.to_string())?,
        None => IndexConfig::default(),
    };
    if let Some(min_score) = cli.min_score {
        config.resolver.min_score = min_score;
        config.check().map_err(|err| format!("Invalid --min-score {min_score}: {err}"))?;
    }

    let options = RunOptions {
        index_path: cli.index,
        mapping_path: cli.mapping,
        html_path: cli.html,
        checklist_path: cli.checklist,
        json_path: cli.json,
        check_files: cli.check_files,
    };

    let summary = help_index_pipeline::run(&options, &config).map_err(|err| err.to_string())?;
    print_summary(&options, &summary);
    Ok(())
}

fn print_summary(options: &RunOptions, summary: &RunSummary) {
    let resolution = &summary.resolution;
    println!(
        "Processed {} entries in {} brands",
        summary.build.entries, summary.build.brands
    );
    println!(
        "Linked {}/{} entries to {} files",
        resolution.resolved, resolution.linkable, summary.referenced_files
    );
    if resolution.unresolved > 0 {
        println!("Entries without a file: {}", resolution.unresolved);
        for text in &resolution.unresolved_entries {
            println!("  - {text}");
        }
    }
    if options.check_files && summary.missing_files > 0 {
        println!("Missing files: {}", summary.missing_files);
    }
    println!("Wrote {}", options.html_path.display());
    println!("Wrote {}", options.checklist_path.display());
    if let Some(json_path) = &options.json_path {
        println!("Wrote {}", json_path.display());
    }
}
