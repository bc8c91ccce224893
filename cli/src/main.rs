//! docsift CLI - heading outlines and persona-ranked sections from PDFs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::batch::{self, BatchOptions};
use docsift::parser::SpanDump;
use docsift::{render, AnalysisOptions, IngestOptions, JsonFormat, PersonaTask};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract heading outlines and persona-ranked sections from PDFs", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Process documents on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    /// Write compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Maximum spans kept per page (0 = unlimited)
    #[arg(long, global = true, value_name = "N", default_value_t = 5000)]
    max_spans_per_page: usize,

    /// Time budget per document in seconds
    #[arg(long, global = true, value_name = "SECS")]
    time_budget_secs: Option<u64>,
}

impl CommonArgs {
    fn batch_options(&self) -> BatchOptions {
        let mut ingest = IngestOptions::new()
            .lenient()
            .with_max_spans_per_page(self.max_spans_per_page);
        if let Some(secs) = self.time_budget_secs {
            ingest = ingest.with_time_budget(Duration::from_secs(secs));
        }

        let mut analysis = AnalysisOptions::new();
        if self.sequential {
            analysis = analysis.sequential();
        }

        BatchOptions::new()
            .with_ingest(ingest)
            .with_analysis(analysis)
            .with_format(self.format())
    }

    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and heading outline of every document in a directory
    Outline {
        /// Directory holding PDFs or span dumps
        #[arg(value_name = "INPUT_DIR", env = "DOCSIFT_INPUT")]
        input: PathBuf,

        /// Directory for the <name>.json outlines
        #[arg(value_name = "OUTPUT_DIR", env = "DOCSIFT_OUTPUT", default_value = "output")]
        output: PathBuf,
    },

    /// Rank sections of a document collection for a persona and job
    Analyze {
        /// Directory holding PDFs or span dumps, plus persona.txt and job.txt
        #[arg(value_name = "INPUT_DIR", env = "DOCSIFT_INPUT")]
        input: PathBuf,

        /// Directory for challenge1b_output.json
        #[arg(value_name = "OUTPUT_DIR", env = "DOCSIFT_OUTPUT", default_value = "output")]
        output: PathBuf,

        /// Persona description (overrides persona.txt)
        #[arg(long)]
        persona: Option<String>,

        /// Job to be done (overrides job.txt)
        #[arg(long)]
        job: Option<String>,
    },

    /// Dump the ingested spans of a document as JSON
    Spans {
        /// Input PDF or span dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline { input, output } => cmd_outline(&input, &output, &cli.common),
        Commands::Analyze {
            input,
            output,
            persona,
            job,
        } => cmd_analyze(&input, &output, persona, job, &cli.common),
        Commands::Spans { input, output } => cmd_spans(&input, output.as_deref(), &cli.common),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = batch::discover_documents(input)?;
    log::debug!("{} documents in {}", files.len(), input.display());
    if files.is_empty() {
        println!(
            "{} {}",
            "No documents found in".yellow(),
            input.display()
        );
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = common.batch_options();
    let records = batch::run_outline_batch_with_progress(input, output, &options, |record| {
        let name = record.input.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if records.is_empty() {
        return Ok(());
    }

    println!("{}", "Outlines:".green().bold());
    for (i, record) in records.iter().enumerate() {
        let branch = if i + 1 == records.len() { "└─" } else { "├─" };
        let name = record.output.file_name().unwrap_or_default().to_string_lossy();
        if record.succeeded {
            println!(
                "  {} {} ({} headings)",
                branch.dimmed(),
                name,
                record.outline.outline.len()
            );
        } else {
            println!("  {} {} {}", branch.dimmed(), name, "(failed)".red());
        }
    }

    Ok(())
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    persona: Option<String>,
    job: Option<String>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = match (persona, job) {
        (None, None) => None,
        (persona, job) => {
            let defaults = batch::load_task(input);
            Some(PersonaTask::new(
                persona.unwrap_or(defaults.persona),
                job.unwrap_or(defaults.job),
            ))
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Ranking sections...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = batch::run_persona_batch(input, output, task, &common.batch_options())?;
    pb.finish_and_clear();

    println!("{}: {}", "Persona".bold(), report.metadata.persona);
    println!("{}: {}", "Job".bold(), report.metadata.job_to_be_done);
    println!(
        "{}: {}",
        "Documents".bold(),
        report.metadata.input_documents.len()
    );
    println!();

    for section in &report.extracted_sections {
        println!(
            "  {:>2}. {} {}",
            section.importance_rank,
            section.section_title.lines().next().unwrap_or_default(),
            format!("({}, p.{})", section.document, section.page_number).dimmed()
        );
    }

    println!(
        "\n{} {}",
        "Saved to".green(),
        output.join(batch::REPORT_FILE_NAME).display()
    );

    Ok(())
}

fn cmd_spans(
    input: &Path,
    output: Option<&Path>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = common.batch_options();
    let layout = docsift::parser::ingest_path(input, &options.ingest)?;
    let json = render::to_json(&SpanDump::from(&layout), options.format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} spans, {} pages)",
            "Saved to".green(),
            path.display(),
            layout.span_count(),
            layout.page_count()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading outlines and persona-ranked sections from PDF layout");
    println!();
    println!("License: MIT");
}
