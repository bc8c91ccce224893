//! Directory batch drivers for outline and persona mode.
//!
//! Both drivers pick up every `*.pdf` and `*.json` file directly inside the
//! input directory, in file-name order. A failing document never aborts the
//! batch: outline mode writes the error sentinel for it, persona mode leaves
//! it out of the report.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{AnalysisOptions, OutlineBuilder, PersonaAnalyzer};
use crate::detect::has_supported_extension;
use crate::error::Result;
use crate::model::{AnalysisReport, DocumentLayout, DocumentOutline, PersonaTask};
use crate::parser::{ingest_path, IngestOptions};
use crate::render::{write_json, JsonFormat};

/// File name of the persona-mode report.
pub const REPORT_FILE_NAME: &str = "challenge1b_output.json";

/// Side file holding the persona description.
pub const PERSONA_FILE_NAME: &str = "persona.txt";

/// Side file holding the job description.
pub const JOB_FILE_NAME: &str = "job.txt";

/// Options shared by the batch drivers.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Ingestion limits and error mode
    pub ingest: IngestOptions,

    /// Analysis tunables, including parallelism
    pub analysis: AnalysisOptions,

    /// Output JSON format
    pub format: JsonFormat,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            ingest: IngestOptions::new().lenient(),
            analysis: AnalysisOptions::default(),
            format: JsonFormat::Pretty,
        }
    }
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ingestion options.
    pub fn with_ingest(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }

    /// Set analysis options.
    pub fn with_analysis(mut self, analysis: AnalysisOptions) -> Self {
        self.analysis = analysis;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Process documents on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.analysis = self.analysis.sequential();
        self
    }
}

/// Outcome of one document in an outline batch.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRecord {
    /// Input document
    pub input: PathBuf,
    /// Written JSON file
    pub output: PathBuf,
    /// The outline written (a sentinel on failure)
    pub outline: DocumentOutline,
    /// Whether the document was processed without error
    pub succeeded: bool,
}

/// List the documents of a directory in file-name order.
pub fn discover_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_supported_extension(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Ingest one document and extract its outline.
pub fn outline_document<P: AsRef<Path>>(path: P, options: &BatchOptions) -> Result<DocumentOutline> {
    let layout = ingest_path(path, &options.ingest)?;
    Ok(OutlineBuilder::new(&options.analysis).build(&layout))
}

/// Run outline mode over a directory, writing `<stem>.json` per document.
pub fn run_outline_batch<P, Q>(input: P, output: Q, options: &BatchOptions) -> Result<Vec<OutlineRecord>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    run_outline_batch_with_progress(input, output, options, |_| {})
}

/// Like [`run_outline_batch`], calling `on_done` after each document.
pub fn run_outline_batch_with_progress<P, Q, F>(
    input: P,
    output: Q,
    options: &BatchOptions,
    on_done: F,
) -> Result<Vec<OutlineRecord>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&OutlineRecord) + Sync,
{
    let output = output.as_ref();
    fs::create_dir_all(output)?;

    let files = discover_documents(input.as_ref())?;
    if files.is_empty() {
        log::warn!("No documents found in {}", input.as_ref().display());
        return Ok(Vec::new());
    }

    let process = |path: &PathBuf| -> OutlineRecord {
        let record = outline_one(path, output, options);
        on_done(&record);
        record
    };

    let records = if options.analysis.is_parallel() {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };
    Ok(records)
}

/// Outline and write one document. Failures are logged and recorded, never
/// returned, so one bad document cannot stop the batch.
fn outline_one(path: &Path, output_dir: &Path, options: &BatchOptions) -> OutlineRecord {
    log::info!("Processing {}", path.display());

    let (outline, mut succeeded) = match outline_document(path, options) {
        Ok(outline) => (outline, true),
        Err(e) => {
            log::error!("Error processing {}: {}", path.display(), e);
            (DocumentOutline::processing_error(), false)
        }
    };

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let target = output_dir.join(format!("{}.json", stem));
    match write_json(&outline, &target, options.format) {
        Ok(()) => log::info!("Generated {}", target.display()),
        Err(e) => {
            log::error!("Error writing {}: {}", target.display(), e);
            succeeded = false;
        }
    }

    OutlineRecord {
        input: path.to_path_buf(),
        output: target,
        outline,
        succeeded,
    }
}

/// Read `persona.txt` and `job.txt` from a directory.
///
/// A missing file falls back to its default; contents are trimmed. If either
/// file exists but cannot be read, both fall back to the defaults.
pub fn load_task<P: AsRef<Path>>(dir: P) -> PersonaTask {
    let dir = dir.as_ref();
    let read = || -> Result<PersonaTask> {
        Ok(PersonaTask::new(
            read_side_file(&dir.join(PERSONA_FILE_NAME), PersonaTask::DEFAULT_PERSONA)?,
            read_side_file(&dir.join(JOB_FILE_NAME), PersonaTask::DEFAULT_JOB)?,
        ))
    };
    read().unwrap_or_else(|e| {
        log::error!("Error reading task files in {}: {}", dir.display(), e);
        PersonaTask::default()
    })
}

fn read_side_file(path: &Path, default: &str) -> Result<String> {
    if !path.exists() {
        return Ok(default.to_string());
    }
    Ok(fs::read_to_string(path)?.trim().to_string())
}

/// Local ISO-8601 timestamp with microseconds.
pub fn processing_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Ingest every document of a directory, dropping the ones that fail.
pub fn ingest_directory<P: AsRef<Path>>(dir: P, options: &BatchOptions) -> Result<Vec<DocumentLayout>> {
    let files = discover_documents(dir)?;

    let ingest_one = |path: &PathBuf| -> Option<DocumentLayout> {
        log::info!("Processing {}", path.display());
        match ingest_path(path, &options.ingest) {
            Ok(layout) => Some(layout),
            Err(e) => {
                log::error!("Error processing {}: {}", path.display(), e);
                None
            }
        }
    };

    let layouts: Vec<Option<DocumentLayout>> = if options.analysis.is_parallel() {
        files.par_iter().map(ingest_one).collect()
    } else {
        files.iter().map(ingest_one).collect()
    };
    Ok(layouts.into_iter().flatten().collect())
}

/// Run persona mode over a directory and write the report.
///
/// `task` overrides the side files of the input directory when given.
pub fn run_persona_batch<P, Q>(
    input: P,
    output: Q,
    task: Option<PersonaTask>,
    options: &BatchOptions,
) -> Result<AnalysisReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();
    fs::create_dir_all(output)?;

    let task = task.unwrap_or_else(|| load_task(input));
    let layouts = ingest_directory(input, options)?;

    let report = if layouts.is_empty() {
        log::warn!("No documents found in {}", input.display());
        AnalysisReport::empty(&task, processing_timestamp())
    } else {
        PersonaAnalyzer::new(options.analysis.clone()).analyze(
            &layouts,
            &task,
            processing_timestamp(),
        )
    };

    let target = output.join(REPORT_FILE_NAME);
    write_json(&report, &target, options.format)?;
    log::info!("Generated {}", target.display());

    Ok(report)
}
