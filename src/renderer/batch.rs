//! Batch conversion of a directory of saved pages

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{error, info, instrument, warn};

use super::config::{BANNER_RULE_WIDTH, DOCUMENT_RULE_WIDTH, RendererConfig};
use super::document::convert_file;
use super::error::RenderError;

/// A page that could not be converted
#[derive(Debug, Clone, Serialize)]
pub struct ConversionFailure {
    /// Input file
    pub path: PathBuf,

    /// Why the conversion failed
    pub reason: String,
}

/// Outcome of a batch conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Number of pages a conversion was attempted for
    pub attempted: usize,

    /// Number of pages converted and written
    pub converted: usize,

    /// Pages that were skipped
    pub failures: Vec<ConversionFailure>,

    /// Combined reference, if one was written
    pub combined_path: Option<PathBuf>,
}

/// List the pages to convert, sorted by file name
///
/// Only `.html` files directly inside `input_dir` are returned; the reserved
/// index file is excluded.
pub fn collect_inputs(input_dir: &Path, index_file: &str) -> Result<Vec<PathBuf>, RenderError> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == "html") {
            continue;
        }
        if path.file_name().is_some_and(|name| name == index_file) {
            continue;
        }
        inputs.push(path);
    }
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(inputs)
}

/// Write `contents` to `path` through a temporary file in `dir`
///
/// The temporary file is renamed over `path` only once it is fully written,
/// so a failed write never leaves a partial file behind.
fn write_atomic(dir: &Path, path: &Path, contents: &str) -> io::Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.persist(path).map_err(io::Error::from)?;
    Ok(())
}

/// Build the combined reference from converted documents, in the given order
pub fn build_combined(banner: &str, documents: &[String]) -> String {
    let document_rule = "=".repeat(DOCUMENT_RULE_WIDTH);
    let mut combined = format!("{}\n{}\n\n", banner, "=".repeat(BANNER_RULE_WIDTH));
    for document in documents {
        combined.push_str(document);
        combined.push_str("\n\n");
        combined.push_str(&document_rule);
        combined.push_str("\n\n");
    }
    combined
}

/// Convert every saved page in the configured input directory
///
/// Each page is converted on its own; a page that fails to convert or to
/// be written is logged and skipped without leaving output behind. Once all pages are done the combined
/// reference is written with every converted document in file-name order.
#[instrument(skip(config), fields(input = %config.input_dir.display()))]
pub fn convert_directory(config: &RendererConfig) -> Result<BatchReport, RenderError> {
    let inputs = collect_inputs(&config.input_dir, &config.index_file)?;
    if inputs.is_empty() {
        warn!("No HTML files found in {}", config.input_dir.display());
        return Ok(BatchReport::default());
    }

    info!("Found {} HTML files to convert", inputs.len());
    fs::create_dir_all(&config.output_dir)?;
    info!("Output directory: {}", config.output_dir.display());

    let mut report = BatchReport {
        attempted: inputs.len(),
        ..Default::default()
    };
    let mut documents = Vec::with_capacity(inputs.len());

    for input in &inputs {
        info!("Converting: {}", input.display());
        let output = config.output_path_for(input);
        let written = convert_file(input).and_then(|text| {
            write_atomic(&config.output_dir, &output, &text)?;
            Ok(text)
        });
        match written {
            Ok(text) => {
                info!("Saved: {}", output.display());
                documents.push(text);
                report.converted += 1;
            }
            Err(e) => {
                error!("Error converting {}: {}", input.display(), e);
                report.failures.push(ConversionFailure {
                    path: input.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let combined_path = config.combined_path();
    write_atomic(
        &config.output_dir,
        &combined_path,
        &build_combined(&config.banner(), &documents),
    )?;
    info!("Created combined documentation: {}", combined_path.display());
    report.combined_path = Some(combined_path);

    info!(
        "Conversion complete! Converted {} of {} files",
        report.converted, report.attempted
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_combined_layout() {
        let combined = build_combined("Site Documentation - Complete Reference", &[
            "A\n=\n\nfirst".to_string(),
            "B\n=\n\nsecond".to_string(),
        ]);
        let rule = "=".repeat(80);
        let expected = format!(
            "Site Documentation - Complete Reference\n{}\n\nA\n=\n\nfirst\n\n{rule}\n\nB\n=\n\nsecond\n\n{rule}\n\n",
            "=".repeat(50)
        );
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_build_combined_without_documents() {
        assert_eq!(build_combined("Banner", &[]), format!("Banner\n{}\n\n", "=".repeat(50)));
    }

    #[test]
    fn test_collect_inputs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta.html", "alpha.html", "index.html", "notes.txt", "beta.htm"] {
            fs::write(dir.path().join(name), "<p>x</p>").unwrap();
        }
        fs::create_dir(dir.path().join("nested.html")).unwrap();

        let inputs = collect_inputs(dir.path(), "index.html").unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.html", "zeta.html"]);
    }

    #[test]
    fn test_missing_input_dir_is_an_error() {
        let config = RendererConfig::builder()
            .input_dir("/definitely/not/here")
            .build();
        assert!(matches!(convert_directory(&config), Err(RenderError::Io(_))));
    }

    #[test]
    fn test_unwritable_output_is_skipped() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            let page = format!("<html><head><title>{name}</title></head><body><p>{name} body</p></body></html>");
            fs::write(input.path().join(format!("{name}.html")), page).unwrap();
        }
        fs::create_dir(output.path().join("b.txt")).unwrap();

        let config = RendererConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path())
            .site_name("Konva")
            .build();
        let report = convert_directory(&config).unwrap();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.converted, 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("b.html"));

        assert!(output.path().join("b.txt").is_dir());
        assert_eq!(fs::read_to_string(output.path().join("c.txt")).unwrap(), "c\n=\n\nc body");

        let combined = fs::read_to_string(config.combined_path()).unwrap();
        assert!(combined.contains("a body"));
        assert!(!combined.contains("b body"));
        assert!(combined.contains("c body"));

        let mut names: Vec<_> = fs::read_dir(output.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "konva_complete_docs.txt"]);
    }

    #[test]
    fn test_empty_input_dir_writes_nothing() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let config = RendererConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path().join("text"))
            .build();

        let report = convert_directory(&config).unwrap();
        assert_eq!(report.attempted, 0);
        assert_eq!(report.combined_path, None);
        assert!(!output.path().join("text").exists());
    }
}
