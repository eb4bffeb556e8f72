mod csv_out;
mod error;
mod matcher;
mod model;
mod options;
mod page_writer;
mod pdf_reader;
mod table_detect;
mod table_parse;
mod warning;

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::warn;

pub use error::ScanError;
pub use model::{DetectedTable, FileExtraction, MatchRecord, PageText, ScanReport};
pub use options::{PagePolicy, ScanOptions, WriteErrorPolicy};
pub use warning::{ScanWarning, WarningCode};

pub const SUMMARY_FILE_NAME: &str = "extracted_data.csv";

const PDF_SUFFIX: &str = ".pdf";

/// Scan every `.pdf` file in `source_dir` for `pattern`, write one derived
/// single-page PDF per match plus a summary CSV into `dest_dir`, and return
/// the per-file results.
///
/// Extraction failures are isolated per file and surface as warnings on the
/// report; a missing source directory or a malformed pattern fails before
/// any file is touched.
pub fn scan_folder(
    source_dir: &Path,
    pattern: &str,
    dest_dir: &Path,
    options: &ScanOptions,
) -> Result<ScanReport, ScanError> {
    if options.min_cols < 2 {
        return Err(ScanError::InvalidOption(
            "min_cols must be at least 2".to_string(),
        ));
    }
    if !source_dir.is_dir() {
        return Err(ScanError::SourceDirMissing(source_dir.to_path_buf()));
    }

    let regex = matcher::compile_pattern(pattern)?;
    fs::create_dir_all(dest_dir)?;

    let mut warnings = Vec::new();
    let documents = list_documents(source_dir)?;
    if documents.is_empty() {
        warnings.push(ScanWarning::new(
            WarningCode::NoDocumentsFound,
            "no .pdf files found in source directory",
        ));
    }

    let mut files = Vec::with_capacity(documents.len());
    let mut records = Vec::new();
    for (filename, path) in &documents {
        let extraction =
            process_document(filename, path, &regex, dest_dir, options, &mut warnings)?;
        records.extend(extraction.matches.iter().cloned());
        files.push(extraction);
    }

    csv_out::write_summary(
        &dest_dir.join(SUMMARY_FILE_NAME),
        &records,
        options.delimiter,
    )?;

    Ok(ScanReport { files, warnings })
}

/// Candidate files sorted by name so repeated runs produce identical output.
fn list_documents(source_dir: &Path) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let Ok(filename) = entry.file_name().into_string() else {
            continue;
        };
        if !filename.ends_with(PDF_SUFFIX) || !entry.path().is_file() {
            continue;
        }
        documents.push((filename, entry.path()));
    }

    documents.sort();
    Ok(documents)
}

fn process_document(
    filename: &str,
    path: &Path,
    regex: &Regex,
    dest_dir: &Path,
    options: &ScanOptions,
    warnings: &mut Vec<ScanWarning>,
) -> Result<FileExtraction, ScanError> {
    let tables = match table_detect::extract_tables(path, options.min_cols) {
        Ok(tables) => tables,
        Err(error) => {
            warn!("table extraction failed for {filename}: {error}");
            warnings.push(
                ScanWarning::new(WarningCode::TableExtractionFailed, error.to_string())
                    .with_file(filename),
            );
            Vec::new()
        }
    };
    for table in &tables {
        if table.confidence < table_detect::LOW_CONFIDENCE_THRESHOLD {
            warnings.push(
                ScanWarning::new(WarningCode::LowConfidence, "table structure is ambiguous")
                    .with_file(filename)
                    .with_page(table.page),
            );
        }
    }

    let pages = match pdf_reader::read_pdf_pages(path) {
        Ok(pages) => pages,
        Err(error) => {
            warn!("text extraction failed for {filename}: {error}");
            warnings.push(
                ScanWarning::new(WarningCode::TextExtractionFailed, error.to_string())
                    .with_file(filename),
            );
            Vec::new()
        }
    };

    let joined = matcher::join_pages(&pages);
    let page_map = matcher::PageMap::new(&pages);
    let found = matcher::find_matches(regex, filename, &joined);

    let stem = filename.strip_suffix(PDF_SUFFIX).unwrap_or(filename);
    let mut matches = Vec::with_capacity(found.len());
    for (index, (record, start)) in found.into_iter().enumerate() {
        let page_number = match options.page_policy {
            PagePolicy::FirstPage => 1,
            PagePolicy::MatchPage => page_map.page_at(start).unwrap_or(1),
        };

        let dest = dest_dir.join(format!("{stem}_{}{PDF_SUFFIX}", index + 1));
        if let Err(error) = page_writer::write_match_page(path, &dest, page_number) {
            match options.write_error_policy {
                WriteErrorPolicy::Abort => return Err(error),
                WriteErrorPolicy::Skip => {
                    warn!("failed to write {}: {error}", dest.display());
                    warnings.push(
                        ScanWarning::new(WarningCode::MatchWriteFailed, error.to_string())
                            .with_file(filename),
                    );
                }
            }
        }

        matches.push(record);
    }

    Ok(FileExtraction {
        filename: filename.to_string(),
        tables,
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::list_documents;

    #[test]
    fn lists_pdf_files_sorted_and_skips_other_extensions() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        for name in ["b.pdf", "a.pdf", "notes.txt", "upper.PDF"] {
            std::fs::write(dir.path().join(name), b"stub").expect("fixture should be written");
        }

        let documents = list_documents(dir.path()).expect("listing should succeed");
        let names = documents
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }
}
