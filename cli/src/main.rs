//! pdf-outline CLI - title and heading outline extraction for a folder of PDFs

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{find_pdfs, process_directory_with, BatchOptions, BatchReport};
use pdf_outline::{ExtractOptions, HeadingConfig, JsonFormat};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Extract titles and H1-H3 heading outlines from PDF files",
    long_about = "Reads every .pdf file in INPUT and writes a JSON file with the same \
                  name into OUTPUT containing the detected title and heading outline. \
                  Files that cannot be processed are reported and skipped."
)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory for JSON output (created if missing)
    #[arg(value_name = "OUTPUT", default_value = "output")]
    output: PathBuf,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Fail a document when any of its pages cannot be read
    #[arg(long)]
    strict: bool,

    /// Additional section name always treated as a top-level heading (repeatable)
    #[arg(long = "keyword", value_name = "WORD")]
    keywords: Vec<String>,
}

impl Cli {
    fn batch_options(&self) -> BatchOptions {
        let headings = HeadingConfig::new().with_keywords(&self.keywords);
        let extract = if self.strict {
            ExtractOptions::new().strict()
        } else {
            ExtractOptions::new().lenient()
        };
        let format = if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };

        BatchOptions::new()
            .with_extract_options(extract.with_headings(headings))
            .with_format(format)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cmd_process(&cli.input, &cli.output, cli.batch_options()) {
        Ok(report) if report.is_success() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_process(
    input: &Path,
    output: &Path,
    options: BatchOptions,
) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let total = find_pdfs(input)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            input.display()
        );
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory_with(input, output, &options, |path, outcome| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match outcome {
            Ok(done) => pb.println(format!(
                "{} {} {} {}",
                "✓".green(),
                name,
                "→".dimmed(),
                done.output.display()
            )),
            Err(failed) => pb.println(format!(
                "{} {} {}",
                "✗".red(),
                name,
                format!("({}: {})", failed.kind(), failed.error).dimmed()
            )),
        }
        pb.set_message(name);
        pb.inc(1);
    })?;

    pb.finish_and_clear();
    print_summary(&report, output);

    Ok(report)
}

fn print_summary(report: &BatchReport, output: &Path) {
    println!(
        "\n{} {} processed, {} failed",
        "Done!".green().bold(),
        report.processed.len(),
        report.failed.len()
    );
    if !report.processed.is_empty() {
        println!("{} {}", "Output:".bold(), output.display());
    }
    for failed in &report.failed {
        println!(
            "  {} {}: {}",
            "└─".dimmed(),
            failed.input.display(),
            failed.error.to_string().red()
        );
    }
}
