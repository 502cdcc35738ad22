//! Directory batch processing.
//!
//! Every `.pdf` file in an input directory is turned into a `.json` file of
//! the same stem in the output directory. A file that fails is logged and
//! recorded in the [`BatchReport`]; the remaining files are still processed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::has_pdf_extension;
use crate::error::{Error, FailureKind, Result};
use crate::outline::{ExtractOptions, OutlineExtractor};
use crate::parser::LopdfBackend;
use crate::render::{write_json, JsonFormat};

/// Extension of written outline files.
pub const OUTPUT_EXTENSION: &str = "json";

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Per-document extraction options
    pub extract: ExtractOptions,

    /// JSON layout of written files
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

/// A document that was written successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub headings: usize,
}

/// A document that could not be processed.
#[derive(Debug)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: Error,
}

impl FailedFile {
    pub fn kind(&self) -> FailureKind {
        self.error.failure_kind()
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedFile>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// Whether every file succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files attempted.
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// List the PDF files of a directory, sorted by file name.
pub fn find_pdfs<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for an input file: same stem, `.json` extension.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .unwrap_or(input.as_os_str())
        .to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

/// Extract and write the outline of one file.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<ProcessedFile> {
    let result = {
        let backend = LopdfBackend::load_file(input)?;
        OutlineExtractor::with_options(backend, options.extract.clone()).extract()?
    };

    let output = output_path_for(input, output_dir);
    write_json(&result, &output, options.format)?;

    Ok(ProcessedFile {
        input: input.to_path_buf(),
        output,
        headings: result.outline.len(),
    })
}

/// Process every PDF in `input_dir`, writing outlines into `output_dir`.
///
/// Creates `output_dir` if absent. Only a failure to list the input
/// directory or create the output directory aborts the run. An input whose
/// output name was already written in this run (`a.pdf` after `a.PDF`)
/// fails with [`Error::OutputCollision`] instead of overwriting it.
pub fn process_directory<P, Q>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    process_directory_with(input_dir, output_dir, options, |_, _| {})
}

/// Like [`process_directory`], calling `on_file` after each attempt.
pub fn process_directory_with<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    mut on_file: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&Path, std::result::Result<&ProcessedFile, &FailedFile>),
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let files = find_pdfs(input_dir)?;
    log::info!("Found {} PDF files", files.len());

    let mut report = BatchReport::default();
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();
    for input in files {
        log::info!("Processing {}", input.display());
        let output = output_path_for(&input, output_dir);
        let outcome = match written.get(&output) {
            Some(first) => Err(Error::OutputCollision(output, first.clone())),
            None => process_file(&input, output_dir, options),
        };
        match outcome {
            Ok(done) => {
                log::info!(
                    "Saved {} ({} headings)",
                    done.output.display(),
                    done.headings
                );
                on_file(&input, Ok(&done));
                written.insert(done.output.clone(), input);
                report.processed.push(done);
            }
            Err(error) => {
                log::warn!(
                    "Failed to process {} ({}): {}",
                    input.display(),
                    error.failure_kind(),
                    error
                );
                let failed = FailedFile { input, error };
                on_file(&failed.input, Err(&failed));
                report.failed.push(failed);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for() {
        let out = Path::new("out");
        assert_eq!(
            output_path_for(Path::new("in/paper.pdf"), out),
            Path::new("out/paper.json")
        );
        assert_eq!(
            output_path_for(Path::new("in/SCAN.PDF"), out),
            Path::new("out/SCAN.json")
        );
        assert_eq!(
            output_path_for(Path::new("in/v1.2.report.pdf"), out),
            Path::new("out/v1.2.report.json")
        );
    }

    #[test]
    fn test_find_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let names: Vec<String> = find_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_directory(
            dir.path().join("missing"),
            dir.path().join("out"),
            &BatchOptions::default(),
        );
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_bad_files_do_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("fake.pdf"), b"this is not a pdf").unwrap();
        fs::write(input.join("truncated.pdf"), b"%PDF-1.4\n1 0 obj\n<<").unwrap();

        let output = dir.path().join("out");
        let mut seen = Vec::new();
        let report = process_directory_with(&input, &output, &BatchOptions::default(), |p, r| {
            seen.push((p.to_path_buf(), r.is_ok()));
        })
        .unwrap();

        assert!(output.is_dir());
        assert_eq!(report.total(), 2);
        assert!(!report.is_success());
        assert!(matches!(report.failed[0].error, Error::UnknownFormat));
        assert!(report.failed.iter().all(|f| f.kind() != FailureKind::Io));
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(_, ok)| !ok));
    }
}
