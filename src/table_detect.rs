use std::path::Path;

use crate::error::ScanError;
use crate::model::{DetectedTable, PageText};
use crate::pdf_reader::read_pdf_pages;
use crate::table_parse::{modal_width, soft_split_line_into_cells, split_line_into_cells};

pub(crate) const LOW_CONFIDENCE_THRESHOLD: f32 = 0.60;

/// Structured table rows for one document. Loads the file on its own so a
/// failure here stays independent of the text-extraction attempt.
pub(crate) fn extract_tables(
    input_pdf: &Path,
    min_cols: usize,
) -> Result<Vec<DetectedTable>, ScanError> {
    let pages = read_pdf_pages(input_pdf)?;
    Ok(detect_tables(&pages, min_cols))
}

pub(crate) fn detect_tables(pages: &[PageText], min_cols: usize) -> Vec<DetectedTable> {
    pages
        .iter()
        .flat_map(|page| detect_tables_in_page(page, min_cols.max(2)))
        .collect()
}

fn detect_tables_in_page(page: &PageText, min_cols: usize) -> Vec<DetectedTable> {
    let mut tables = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    // Trailing empty line flushes the final run.
    for line in page.text.lines().chain(std::iter::once("")) {
        let cells = line_cells(line, min_cols);
        if cells.len() >= min_cols {
            run.push(cells);
            continue;
        }

        if run.len() >= 2 {
            let rows = std::mem::take(&mut run);
            let confidence = table_confidence(&rows);
            tables.push(DetectedTable {
                page: page.page_number,
                rows,
                confidence,
            });
        } else {
            run.clear();
        }
    }

    tables
}

fn line_cells(line: &str, min_cols: usize) -> Vec<String> {
    let cells = split_line_into_cells(line);
    if cells.len() >= min_cols {
        return cells;
    }

    let soft = soft_split_line_into_cells(line);
    let ends_like_sentence = line.trim_end().ends_with(['.', '!', '?']);
    let has_numeric = soft
        .iter()
        .any(|cell| cell.chars().any(|ch| ch.is_ascii_digit()));
    if soft.len() >= min_cols && !ends_like_sentence && (has_numeric || soft.len() <= 6) {
        soft
    } else {
        cells
    }
}

fn table_confidence(rows: &[Vec<String>]) -> f32 {
    if rows.len() < 2 {
        return 0.0;
    }

    let modal = modal_width(rows);
    if modal == 0 {
        return 0.0;
    }

    let consistent =
        rows.iter().filter(|row| row.len() == modal).count() as f32 / rows.len() as f32;
    let max_width = rows.iter().map(Vec::len).max().unwrap_or(modal);
    let min_width = rows.iter().map(Vec::len).min().unwrap_or(modal);
    let uniformity = if max_width == 0 {
        0.0
    } else {
        1.0 - ((max_width - min_width) as f32 / max_width as f32)
    };

    (consistent * 0.75 + uniformity * 0.25).clamp(0.0, 1.0)
}
